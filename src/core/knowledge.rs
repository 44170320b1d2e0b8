use once_cell::sync::Lazy;
use regex::RegexSet;

pub const SKILL_VOCABULARY: &[&str] = &[
    // Languages
    "JavaScript", "TypeScript", "Python", "Java", "C++", "C#", "Ruby", "PHP", "Swift", "Kotlin",
    "Go", "Rust", "Scala", "R",
    // Frontend
    "React", "Angular", "Vue", "Next.js", "Svelte", "Ember", "Backbone",
    // Backend
    "Node.js", "Express", "NestJS", "Django", "Flask", "Spring", "ASP.NET", "FastAPI", "Laravel",
    "Rails",
    // Databases
    "MongoDB", "PostgreSQL", "MySQL", "Oracle", "SQL Server", "Redis", "Firebase", "Cassandra",
    "DynamoDB", "Elasticsearch", "SQL",
    // Cloud and DevOps
    "AWS", "Azure", "GCP", "Docker", "Kubernetes", "Jenkins", "GitLab", "CircleCI", "Travis CI",
    // Version control
    "Git", "GitHub", "Bitbucket", "SVN",
    // Styling
    "HTML", "CSS", "Sass", "SCSS", "Less", "TailwindCSS", "Bootstrap", "Material-UI",
    "Ant Design",
    // APIs and architecture
    "REST API", "GraphQL", "gRPC", "Microservices", "SOAP",
    // Testing
    "Jest", "Mocha", "Jasmine", "Selenium", "Cypress", "JUnit", "PyTest", "TestNG",
    // Methodologies
    "Agile", "Scrum", "Kanban", "Waterfall", "DevOps",
    // Project tools
    "JIRA", "Confluence", "Trello", "Asana",
    // Build tools
    "Webpack", "Vite", "Babel", "Gulp", "Grunt", "Rollup",
    // State management
    "Redux", "MobX", "Zustand", "Recoil",
    // Mobile
    "React Native", "Flutter", "Ionic", "Xamarin",
    // Data science
    "TensorFlow", "PyTorch", "scikit-learn", "Pandas", "NumPy",
    // Design
    "Figma", "Sketch", "Adobe XD", "Photoshop", "Illustrator",
    // API tooling
    "Postman", "Insomnia", "Swagger",
    // Visualization
    "Chart.js", "Recharts", "D3.js", "Highcharts",
    // CMS
    "WordPress", "Drupal", "Contentful", "Strapi",
    // Auth and security
    "JWT", "OAuth", "RBAC",
    // ORM
    "Mongoose", "Sequelize", "TypeORM",
    // Other
    "ETL", "Data Warehousing", "Big Data", "Hadoop", "Spark", "VS Code", "DTO",
];

/// Lowercase variant spelling -> canonical vocabulary term.
pub const SKILL_NORMALIZATIONS: &[(&str, &str)] = &[
    ("react.js", "React"),
    ("reactjs", "React"),
    ("vue.js", "Vue"),
    ("vuejs", "Vue"),
    ("node", "Node.js"),
    ("nodejs", "Node.js"),
    ("html5", "HTML"),
    ("css3", "CSS"),
    ("javascript (es6+)", "JavaScript"),
    ("es6", "JavaScript"),
    ("typescript", "TypeScript"),
    ("ts", "TypeScript"),
    ("js", "JavaScript"),
    ("postgresql", "PostgreSQL"),
    ("postgres", "PostgreSQL"),
    ("mongo", "MongoDB"),
    ("react native", "React Native"),
    ("express.js", "Express"),
    ("expressjs", "Express"),
    ("restful api", "REST API"),
    ("rest", "REST API"),
    ("rest apis", "REST API"),
    ("jwt auth", "JWT"),
    ("vs code", "VS Code"),
    ("dto validation", "DTO"),
    ("agile/scrum", "Agile"),
];

pub const SKILLS_SECTION_KEYWORDS: &[&str] = &[
    "skills",
    "technical skills",
    "professional skills",
    "core competencies",
    "technologies",
    "expertise",
];

pub const SKILLS_SECTION_TERMINATORS: &[&str] = &[
    "experience",
    "education",
    "work history",
    "employment",
    "projects",
    "certifications",
];

pub const EDUCATION_KEYWORDS: &[&str] = &[
    "bachelor", "master", "phd", "b.s.", "m.s.", "b.tech", "m.tech", "mba", "degree",
];

pub const SUMMARY_KEYWORDS: &[&str] = &["summary", "objective", "profile", "about"];

pub const LOCATION_EXCLUSIONS: &[&str] = &[
    "university", "college", "institute", "school",
    "vercel", "github", "linkedin", "deployed", "live",
    "bachelor", "master", "degree", "certification",
    "january", "february", "march", "april", "may", "june",
    "july", "august", "september", "october", "november", "december",
    "experience", "summary", "skills", "education", "work",
    "project", "stack", "tech", "tools",
    "deployment", "enhancement", "maintenance", "development",
    "implementation", "migration", "testing", "analysis", "design",
    "production", "environment", "solution", "process",
];

pub const KNOWN_CITIES: &[&str] = &[
    "new york", "los angeles", "chicago", "houston", "phoenix",
    "philadelphia", "san antonio", "san diego", "dallas", "san jose",
    "austin", "jacksonville", "san francisco", "columbus", "indianapolis",
    "seattle", "denver", "boston", "portland", "detroit", "miami",
    "atlanta", "nashville", "baltimore", "milwaukee", "albuquerque",
    "toronto", "vancouver", "montreal", "calgary",
    "london", "paris", "berlin", "madrid", "rome",
    "mumbai", "delhi", "bangalore", "hyderabad", "chennai",
    "kolkata", "pune", "ahmedabad", "jaipur", "lucknow",
];

static VOCABULARY_SET: Lazy<RegexSet> = Lazy::new(|| term_set(SKILL_VOCABULARY.iter().copied()));

static NORMALIZATION_SET: Lazy<RegexSet> =
    Lazy::new(|| term_set(SKILL_NORMALIZATIONS.iter().map(|(variant, _)| *variant)));

pub fn matching_skills(text: &str) -> Vec<&'static str> {
    let mut found: Vec<&'static str> = VOCABULARY_SET
        .matches(text)
        .into_iter()
        .map(|index| SKILL_VOCABULARY[index])
        .collect();

    found.extend(
        NORMALIZATION_SET
            .matches(text)
            .into_iter()
            .map(|index| SKILL_NORMALIZATIONS[index].1),
    );

    found
}

// A term edge that is itself a word character gets a plain `\b`; an edge like
// the `+` in "C++" instead needs a non-word neighbour or the end of input.
fn term_set<'a>(terms: impl Iterator<Item = &'a str>) -> RegexSet {
    let patterns: Vec<String> = terms.map(term_pattern).collect();
    RegexSet::new(patterns).expect("skill vocabulary patterns are valid")
}

fn term_pattern(term: &str) -> String {
    let escaped = regex::escape(&term.to_lowercase());
    let starts_word = term.chars().next().is_some_and(is_word_char);
    let ends_word = term.chars().last().is_some_and(is_word_char);

    let head = if starts_word { r"\b" } else { r"(?:^|\W)" };
    let tail = if ends_word { r"\b" } else { r"(?:\W|$)" };
    format!("(?i){head}{escaped}{tail}")
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
