//! Bodies of the files generated inline from preferences

use super::Tier;
use crate::preferences::{AuthMode, Database, PreferenceSet};

/// Database identifier derived from the project name
fn db_name(project_name: &str) -> String {
    let name: String = project_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    if name.is_empty() {
        "app".to_string()
    } else {
        name
    }
}

/// SQLAlchemy URL for the chosen database, reachable at `host`
pub fn database_url(prefs: &PreferenceSet, host: &str) -> Option<String> {
    let name = db_name(&prefs.project_name);
    prefs.database.map(|db| match db {
        Database::Sqlite => "sqlite:///app.db".to_string(),
        Database::Postgresql => format!("postgresql://app:app@{}:5432/{}", host, name),
        Database::Mysql => format!("mysql+pymysql://app:app@{}:3306/{}", host, name),
    })
}

pub fn readme(prefs: &PreferenceSet, tier: Tier) -> String {
    let mut out = format!(
        "# {}\n\nFlask {} project ({} template).\n\n## Getting started\n\n",
        prefs.project_name,
        prefs.project_type,
        tier.dir_name()
    );
    match tier {
        Tier::Beginner => {
            out.push_str("```bash\npip install -r requirements.txt\npython app.py\n```\n");
        }
        Tier::Intermediate | Tier::Professional => {
            out.push_str(
                "```bash\n\
                 python -m venv venv\n\
                 source venv/bin/activate\n\
                 pip install -r requirements.txt\n\
                 cp .env.example .env\n\
                 seo db init\n\
                 seo db migrate\n\
                 seo db upgrade\n\
                 seo user create\n\
                 seo run\n\
                 ```\n",
            );
        }
    }
    if prefs.docker_enabled() {
        out.push_str("\n## Docker\n\n```bash\ndocker compose up --build\n```\n");
    }
    out
}

pub fn env_example(prefs: &PreferenceSet) -> String {
    let mut out = String::from("SECRET_KEY=change-me\nFLASK_APP=");
    out.push_str(if prefs.project_type.is_production_grade() {
        "wsgi.py\n"
    } else {
        "run.py\n"
    });
    if let Some(url) = database_url(prefs, "localhost") {
        out.push_str(&format!("DATABASE_URL={}\n", url));
    }
    if prefs.auth_mode == Some(AuthMode::Jwt) {
        out.push_str("JWT_SECRET_KEY=change-me-too\n");
    }
    if prefs.auth_mode == Some(AuthMode::Oauth) {
        out.push_str("OAUTH_CLIENT_ID=\nOAUTH_CLIENT_SECRET=\n");
    }
    if prefs.stripe_enabled() {
        out.push_str("STRIPE_SECRET_KEY=\nSTRIPE_WEBHOOK_SECRET=\n");
    }
    if prefs.email_enabled() {
        out.push_str("MAIL_SERVER=localhost\nMAIL_PORT=25\nMAIL_USERNAME=\nMAIL_PASSWORD=\n");
    }
    if prefs.async_queue_enabled() {
        out.push_str("CELERY_BROKER_URL=redis://localhost:6379/0\n");
    }
    out
}

pub fn dockerfile(tier: Tier) -> String {
    let cmd = match tier {
        Tier::Professional => r#"["gunicorn", "--bind", "0.0.0.0:5000", "wsgi:app"]"#,
        Tier::Beginner => r#"["flask", "--app", "app", "run", "--host", "0.0.0.0"]"#,
        Tier::Intermediate => r#"["flask", "--app", "run", "run", "--host", "0.0.0.0"]"#,
    };
    format!(
        "FROM python:3.12-slim\n\
         \n\
         WORKDIR /app\n\
         ENV PYTHONDONTWRITEBYTECODE=1 PYTHONUNBUFFERED=1\n\
         \n\
         COPY requirements.txt .\n\
         RUN pip install --no-cache-dir -r requirements.txt\n\
         \n\
         COPY . .\n\
         EXPOSE 5000\n\
         CMD {}\n",
        cmd
    )
}

pub fn docker_compose(prefs: &PreferenceSet) -> String {
    let mut depends_on = Vec::new();
    let mut services = String::new();

    match prefs.database {
        Some(Database::Postgresql) => {
            depends_on.push("db");
            services.push_str(&format!(
                "  db:\n    image: postgres:16\n    environment:\n      \
                 POSTGRES_USER: app\n      POSTGRES_PASSWORD: app\n      POSTGRES_DB: {}\n    \
                 volumes:\n      - db-data:/var/lib/postgresql/data\n",
                db_name(&prefs.project_name)
            ));
        }
        Some(Database::Mysql) => {
            depends_on.push("db");
            services.push_str(&format!(
                "  db:\n    image: mysql:8\n    environment:\n      \
                 MYSQL_USER: app\n      MYSQL_PASSWORD: app\n      MYSQL_ROOT_PASSWORD: root\n      \
                 MYSQL_DATABASE: {}\n    volumes:\n      - db-data:/var/lib/mysql\n",
                db_name(&prefs.project_name)
            ));
        }
        Some(Database::Sqlite) | None => {}
    }

    if prefs.async_queue_enabled() {
        depends_on.push("redis");
        services.push_str("  redis:\n    image: redis:7-alpine\n");
        services.push_str(
            "  worker:\n    build: .\n    command: celery -A celery_worker.celery worker --loglevel=info\n    \
             environment:\n      CELERY_BROKER_URL: redis://redis:6379/0\n    depends_on:\n      - redis\n",
        );
    }

    let mut out = String::from(
        "services:\n  web:\n    build: .\n    ports:\n      - \"5000:5000\"\n    environment:\n      \
         SECRET_KEY: change-me\n",
    );
    if let Some(url) = database_url(prefs, "db") {
        out.push_str(&format!("      DATABASE_URL: {}\n", url));
    }
    if prefs.async_queue_enabled() {
        out.push_str("      CELERY_BROKER_URL: redis://redis:6379/0\n");
    }
    if !depends_on.is_empty() {
        out.push_str("    depends_on:\n");
        for service in &depends_on {
            out.push_str(&format!("      - {}\n", service));
        }
    }
    out.push_str(&services);
    if depends_on.contains(&"db") {
        out.push_str("\nvolumes:\n  db-data:\n");
    }
    out
}

pub fn celery_worker() -> &'static str {
    r#"import os

from celery import Celery

celery = Celery(__name__, broker=os.environ.get("CELERY_BROKER_URL", "redis://localhost:6379/0"))
celery.conf.result_backend = os.environ.get("CELERY_RESULT_BACKEND", celery.conf.broker_url)


@celery.task
def ping():
    return "pong"
"#
}

pub fn gitignore() -> &'static str {
    "__pycache__/\n*.py[cod]\n.env\nvenv/\n.venv/\n*.db\ninstance/\nlogs/\n.pytest_cache/\n"
}
