//! Generator resolution and project planning
//!
//! Each project type maps to one generator variant. A variant carries a
//! small [`VariantConfig`] (template tier, baseline packages, capability
//! flags); planning is a pure function of that config and the preferences.

pub mod files;
pub mod plan;

pub use plan::{EntryKind, ManifestEntry, PostAction, ProjectPlan, REQUIREMENTS_FILE};

use crate::preferences::{AuthMode, Database, PreferenceSet, ProjectType};
use plan::PackageList;
use serde::Serialize;

/// Base complexity tier; names the template directory a variant copies from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Beginner,
    Intermediate,
    Professional,
}

impl Tier {
    pub fn dir_name(&self) -> &'static str {
        match self {
            Tier::Beginner => "beginner",
            Tier::Intermediate => "intermediate",
            Tier::Professional => "professional",
        }
    }

    /// Template entries copied for this tier, relative to its directory
    pub fn skeleton(&self) -> &'static [&'static str] {
        match self {
            Tier::Beginner => &["app.py", "templates", "static"],
            Tier::Intermediate => &["run.py", "app"],
            Tier::Professional => &["wsgi.py", "app"],
        }
    }
}

const LEARNING_BASELINE: &[&str] = &["flask", "python-dotenv"];

const APPLICATION_BASELINE: &[&str] = &[
    "flask",
    "flask-sqlalchemy",
    "flask-migrate",
    "flask-wtf",
    "flask-login",
    "python-dotenv",
];

const API_BASELINE: &[&str] = &[
    "flask",
    "flask-restx",
    "flask-cors",
    "flask-sqlalchemy",
    "flask-migrate",
    "flask-jwt-extended",
    "python-dotenv",
    "gunicorn",
];

/// Per-variant configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantConfig {
    pub tier: Tier,
    /// Packages every project of the variant depends on, in order
    pub baseline: &'static [&'static str],
    /// Add the package backing the chosen auth mode
    pub auth_packages: bool,
    /// Add the driver for the chosen database
    pub database_driver: bool,
    /// Honour the stripe/email/queue flags
    pub saas_extras: bool,
}

/// One concrete project archetype
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectGenerator {
    Learning(VariantConfig),
    Application(VariantConfig),
    Api(VariantConfig),
    Saas(VariantConfig),
}

impl ProjectGenerator {
    pub fn config(&self) -> &VariantConfig {
        match self {
            ProjectGenerator::Learning(c)
            | ProjectGenerator::Application(c)
            | ProjectGenerator::Api(c)
            | ProjectGenerator::Saas(c) => c,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ProjectGenerator::Learning(_) => "learning",
            ProjectGenerator::Application(_) => "application",
            ProjectGenerator::Api(_) => "api",
            ProjectGenerator::Saas(_) => "saas",
        }
    }

    pub fn plan(&self, prefs: &PreferenceSet) -> ProjectPlan {
        plan(self.config(), prefs)
    }
}

/// Select the generator variant for a preference set
pub fn resolve(prefs: &PreferenceSet) -> ProjectGenerator {
    let generator = match prefs.project_type {
        ProjectType::Learning => ProjectGenerator::Learning(VariantConfig {
            tier: Tier::Beginner,
            baseline: LEARNING_BASELINE,
            auth_packages: false,
            database_driver: false,
            saas_extras: false,
        }),
        ProjectType::Application => ProjectGenerator::Application(VariantConfig {
            tier: Tier::Intermediate,
            baseline: APPLICATION_BASELINE,
            auth_packages: true,
            database_driver: true,
            saas_extras: false,
        }),
        ProjectType::Api => ProjectGenerator::Api(VariantConfig {
            tier: Tier::Professional,
            baseline: API_BASELINE,
            auth_packages: true,
            database_driver: true,
            saas_extras: false,
        }),
        ProjectType::Saas => ProjectGenerator::Saas(VariantConfig {
            tier: Tier::Professional,
            baseline: API_BASELINE,
            auth_packages: true,
            database_driver: true,
            saas_extras: true,
        }),
    };
    tracing::debug!(generator = generator.name(), "resolved generator");
    generator
}

fn auth_package(mode: AuthMode) -> Option<&'static str> {
    match mode {
        AuthMode::Session => None,
        AuthMode::Jwt => Some("flask-jwt-extended"),
        AuthMode::Oauth => Some("authlib"),
    }
}

fn driver_package(database: Database) -> Option<&'static str> {
    match database {
        Database::Sqlite => None,
        Database::Postgresql => Some("psycopg2-binary"),
        Database::Mysql => Some("pymysql"),
    }
}

fn resolve_packages(config: &VariantConfig, prefs: &PreferenceSet) -> Vec<String> {
    let mut packages = PackageList::default();
    packages.extend(config.baseline.iter().copied());

    if config.auth_packages {
        if let Some(pkg) = prefs.auth_mode.and_then(auth_package) {
            packages.push(pkg);
        }
    }

    if config.saas_extras {
        if prefs.stripe_enabled() {
            packages.push("stripe");
        }
        if prefs.email_enabled() {
            packages.push("flask-mail");
        }
        if prefs.async_queue_enabled() {
            packages.extend(["celery", "redis"]);
        }
    }

    if config.database_driver {
        if let Some(pkg) = prefs.database.and_then(driver_package) {
            packages.push(pkg);
        }
    }

    packages.into_vec()
}

fn build_manifest(
    config: &VariantConfig,
    prefs: &PreferenceSet,
    packages: &[String],
) -> Vec<ManifestEntry> {
    let mut manifest: Vec<ManifestEntry> = config
        .tier
        .skeleton()
        .iter()
        .map(|path| ManifestEntry::template(path))
        .collect();

    if config.tier == Tier::Professional {
        manifest.push(ManifestEntry::directory("logs"));
    }

    manifest.push(ManifestEntry::inline("README.md", files::readme(prefs, config.tier)));

    if prefs.project_type != ProjectType::Learning {
        manifest.push(ManifestEntry::inline(".env.example", files::env_example(prefs)));
    }
    if prefs.database == Some(Database::Sqlite) {
        manifest.push(ManifestEntry::inline("app.db", ""));
    }
    if config.saas_extras && prefs.async_queue_enabled() {
        manifest.push(ManifestEntry::inline("celery_worker.py", files::celery_worker()));
    }
    if prefs.docker_enabled() {
        manifest.push(ManifestEntry::inline("Dockerfile", files::dockerfile(config.tier)));
        manifest.push(ManifestEntry::inline(
            "docker-compose.yml",
            files::docker_compose(prefs),
        ));
    }
    if prefs.version_control {
        manifest.push(ManifestEntry::inline(".gitignore", files::gitignore()));
    }

    manifest.push(ManifestEntry::inline(
        REQUIREMENTS_FILE,
        plan::render_requirements(packages),
    ));
    manifest
}

/// Compute the plan for `prefs` under a variant configuration
pub fn plan(config: &VariantConfig, prefs: &PreferenceSet) -> ProjectPlan {
    let packages = resolve_packages(config, prefs);
    let manifest = build_manifest(config, prefs, &packages);

    let mut post_actions = vec![PostAction::InstallPackages];
    if prefs.version_control {
        post_actions.push(PostAction::InitVersionControl);
    }

    tracing::debug!(
        tier = config.tier.dir_name(),
        packages = packages.len(),
        entries = manifest.len(),
        "planned project"
    );

    ProjectPlan {
        project_name: prefs.project_name.clone(),
        tier: config.tier,
        packages,
        manifest,
        post_actions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn saas(stripe: bool, email: bool, queue: bool, database: Database) -> PreferenceSet {
        let mut prefs = PreferenceSet::new("shop", ProjectType::Saas);
        prefs.database = Some(database);
        prefs.auth_mode = Some(AuthMode::Session);
        prefs.docker = Some(true);
        prefs.stripe = Some(stripe);
        prefs.email = Some(email);
        prefs.async_queue = Some(queue);
        prefs
    }

    fn packages_of(prefs: &PreferenceSet) -> Vec<String> {
        resolve(prefs).plan(prefs).packages
    }

    #[test]
    fn test_resolve_is_total() {
        for project_type in ProjectType::ALL {
            let prefs = PreferenceSet::new("demo", project_type);
            assert_eq!(resolve(&prefs).name(), project_type.as_str());
        }
    }

    #[test]
    fn test_learning_packages_are_minimal() {
        let mut prefs = PreferenceSet::new("demo", ProjectType::Learning);
        // Planning must ignore stray values for learning projects
        prefs.auth_mode = Some(AuthMode::Jwt);
        prefs.database = Some(Database::Mysql);
        assert_eq!(packages_of(&prefs), vec!["flask", "python-dotenv"]);
    }

    #[test]
    fn test_application_packages() {
        let mut prefs = PreferenceSet::new("blog", ProjectType::Application);
        prefs.database = Some(Database::Sqlite);
        prefs.auth_mode = Some(AuthMode::Session);
        let packages = packages_of(&prefs);
        for pkg in ["flask-sqlalchemy", "flask-wtf", "flask-login", "flask-migrate"] {
            assert!(packages.contains(&pkg.to_string()), "missing {}", pkg);
        }
        assert!(!packages.iter().any(|p| p == "psycopg2-binary" || p == "pymysql"));
    }

    #[test]
    fn test_api_driver_follows_database() {
        let mut prefs = PreferenceSet::new("api", ProjectType::Api);
        prefs.auth_mode = Some(AuthMode::Jwt);

        prefs.database = Some(Database::Postgresql);
        assert_eq!(packages_of(&prefs).last().unwrap(), "psycopg2-binary");

        prefs.database = Some(Database::Mysql);
        assert_eq!(packages_of(&prefs).last().unwrap(), "pymysql");

        prefs.database = Some(Database::Sqlite);
        let packages = packages_of(&prefs);
        assert_eq!(packages, API_BASELINE.to_vec());
    }

    #[test]
    fn test_jwt_package_is_deduplicated() {
        let mut prefs = PreferenceSet::new("api", ProjectType::Api);
        prefs.auth_mode = Some(AuthMode::Jwt);
        prefs.database = Some(Database::Sqlite);
        let packages = packages_of(&prefs);
        let count = packages.iter().filter(|p| *p == "flask-jwt-extended").count();
        assert_eq!(count, 1);
        assert_eq!(packages[5], "flask-jwt-extended");
    }

    #[test]
    fn test_saas_scenario_stripe_and_queue() {
        let packages = packages_of(&saas(true, false, true, Database::Postgresql));
        for pkg in API_BASELINE {
            assert!(packages.contains(&pkg.to_string()));
        }
        assert!(packages.contains(&"stripe".to_string()));
        assert!(packages.contains(&"celery".to_string()));
        assert!(packages.contains(&"redis".to_string()));
        assert!(!packages.contains(&"flask-mail".to_string()));
        let celery = packages.iter().position(|p| p == "celery").unwrap();
        assert_eq!(packages[celery + 1], "redis");
    }

    #[test]
    fn test_saas_flags_are_independent() {
        let packages = packages_of(&saas(false, true, false, Database::Postgresql));
        assert!(packages.contains(&"flask-mail".to_string()));
        assert!(!packages.contains(&"stripe".to_string()));
        assert!(!packages.contains(&"celery".to_string()));
        assert!(!packages.contains(&"redis".to_string()));
    }

    #[test]
    fn test_planning_twice_is_identical() {
        let prefs = saas(true, true, true, Database::Mysql);
        let first = resolve(&prefs).plan(&prefs);
        let second = resolve(&prefs).plan(&prefs);
        assert_eq!(first, second);
        assert_eq!(
            serde_yaml::to_string(&first).unwrap(),
            serde_yaml::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_requirements_is_last_and_matches_packages() {
        let prefs = saas(true, false, true, Database::Postgresql);
        let plan = resolve(&prefs).plan(&prefs);
        let last = plan.manifest.last().unwrap();
        assert_eq!(last.path, REQUIREMENTS_FILE);
        match &last.kind {
            EntryKind::GenerateInline { content } => {
                let lines: Vec<&str> = content.lines().collect();
                assert_eq!(lines, plan.packages.iter().map(String::as_str).collect::<Vec<_>>());
            }
            other => panic!("unexpected entry kind {:?}", other),
        }
    }

    #[test]
    fn test_manifest_follows_features() {
        let prefs = saas(false, false, true, Database::Postgresql);
        let plan = resolve(&prefs).plan(&prefs);
        assert_eq!(plan.tier, Tier::Professional);
        assert_eq!(plan.entry("app").unwrap().kind, EntryKind::CopyFromTemplate);
        assert!(plan.entry("Dockerfile").is_some());
        assert!(plan.entry("celery_worker.py").is_some());
        assert!(plan.entry("app.db").is_none());
        assert!(plan.entry(".gitignore").is_none());
    }

    #[test]
    fn test_version_control_action_appended() {
        let mut prefs = PreferenceSet::new("demo", ProjectType::Learning);
        let plan = resolve(&prefs).plan(&prefs);
        assert_eq!(plan.post_actions, vec![PostAction::InstallPackages]);

        prefs.version_control = true;
        let plan = resolve(&prefs).plan(&prefs);
        assert_eq!(
            plan.post_actions,
            vec![PostAction::InstallPackages, PostAction::InitVersionControl]
        );
        assert!(plan.entry(".gitignore").is_some());
    }

    #[test]
    fn test_sqlite_application_gets_database_file() {
        let mut prefs = PreferenceSet::new("blog", ProjectType::Application);
        prefs.database = Some(Database::Sqlite);
        let plan = resolve(&prefs).plan(&prefs);
        assert_eq!(plan.tier, Tier::Intermediate);
        assert!(plan.entry("app.db").is_some());
        assert!(plan.entry(".env.example").is_some());
    }
}
