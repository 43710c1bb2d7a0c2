//! Presets that ship with infragen.
//!
//! [`all_presets`] is the single entry point. Custom presets loaded by
//! [`crate::preset_loader`] are layered on top of these by the catalog.

use infragen_core::domain::{PortConfig, Preset, PresetService, VolumeConfig};

/// Every built-in preset, ordered by id.
pub fn all_presets() -> Vec<Preset> {
    vec![database(), infrastructure(), microservice(), ml(), web_app()]
}

fn tcp(port: u16) -> PortConfig {
    PortConfig::container(port).with_protocol("tcp")
}

/// Frontend, API and PostgreSQL.
pub fn web_app() -> Preset {
    Preset::new("web-app", "Web app", "Web Applications")
        .with_description("Basic web application with frontend, backend, and database")
        .with_tags(["web", "frontend", "backend", "database"])
        .with_service(
            PresetService::new("frontend", "frontend")
                .described("Frontend web application")
                .with_image("nginx:alpine")
                .with_port(tcp(80))
                .with_env("REACT_APP_API_URL", "http://api:8080"),
        )
        .with_service(
            PresetService::new("api", "api")
                .described("Backend API server")
                .with_image("node:18-alpine")
                .with_port(tcp(8080))
                .with_env("NODE_ENV", "development")
                .with_env("DB_HOST", "database")
                .depending_on("database"),
        )
        .with_service(
            PresetService::new("database", "database")
                .described("PostgreSQL database")
                .with_image("postgres:15")
                .with_port(tcp(5432))
                .with_volume(VolumeConfig::named("db_data", "/var/lib/postgresql/data"))
                .with_env("POSTGRES_DB", "webapp")
                .with_env("POSTGRES_USER", "admin")
                .with_env("POSTGRES_PASSWORD", "changeme"),
        )
}

/// API gateway in front of a service, with a cache.
pub fn microservice() -> Preset {
    Preset::new("microservice", "Microservice", "Microservices")
        .with_description("Microservice architecture with API gateway and services")
        .with_tags(["microservices", "gateway", "cache"])
        .with_service(
            PresetService::new("api-gateway", "gateway")
                .described("API Gateway")
                .with_image("nginx:alpine")
                .with_port(tcp(80))
                .with_env("UPSTREAM_SERVICE1", "service1:8081")
                .depending_on("service1"),
        )
        .with_service(
            PresetService::new("service1", "microservice")
                .described("First microservice")
                .with_image("node:18-alpine")
                .with_port(tcp(8081))
                .with_env("SERVICE_NAME", "service1")
                .depending_on("redis"),
        )
        .with_service(
            PresetService::new("redis", "cache")
                .described("Redis cache")
                .with_image("redis:7-alpine")
                .with_port(tcp(6379))
                .with_volume(VolumeConfig::named("redis_data", "/data")),
        )
}

/// PostgreSQL, with MySQL available but disabled.
pub fn database() -> Preset {
    Preset::new("database", "Database", "Databases")
        .with_description("Database services (PostgreSQL, MySQL, MongoDB)")
        .with_tags(["database", "postgres", "mysql"])
        .with_service(
            PresetService::new("postgres", "database")
                .described("PostgreSQL database")
                .with_image("postgres:15")
                .with_port(tcp(5432))
                .with_volume(VolumeConfig::named(
                    "postgres_data",
                    "/var/lib/postgresql/data",
                ))
                .with_env("POSTGRES_DB", "myapp")
                .with_env("POSTGRES_USER", "postgres"),
        )
        .with_service(
            PresetService::new("mysql", "database")
                .described("MySQL database")
                .with_image("mysql:8.0")
                .with_port(tcp(3306))
                .with_volume(VolumeConfig::named("mysql_data", "/var/lib/mysql"))
                .with_env("MYSQL_DATABASE", "myapp")
                .with_env("MYSQL_USER", "mysql")
                .optional(),
        )
}

/// Notebook, model server and experiment tracking.
pub fn ml() -> Preset {
    Preset::new("ml", "Ml", "Machine Learning")
        .with_description("Machine learning pipeline with model serving")
        .with_tags(["ml", "serving", "notebooks"])
        .with_variable("model_name", "model")
        .with_service(
            PresetService::new("jupyter", "notebook")
                .described("Jupyter notebook server")
                .with_image("jupyter/scipy-notebook:latest")
                .with_port(tcp(8888))
                .with_volume(VolumeConfig::bind("./notebooks", "/home/jovyan/work")),
        )
        .with_service(
            PresetService::new("model-server", "api")
                .described("TensorFlow Serving model server")
                .with_image("tensorflow/serving:latest")
                .with_port(tcp(8501))
                .with_volume(VolumeConfig::named("models", "/models"))
                .with_env("MODEL_NAME", "model"),
        )
        .with_service(
            PresetService::new("mlflow", "tracking")
                .described("MLflow experiment tracking")
                .with_image("ghcr.io/mlflow/mlflow:latest")
                .with_port(tcp(5000))
                .with_volume(VolumeConfig::named("mlflow_data", "/mlflow"))
                .optional(),
        )
}

/// Monitoring and log aggregation.
pub fn infrastructure() -> Preset {
    Preset::new("infrastructure", "Infrastructure", "Infrastructure")
        .with_description("Core infrastructure components (monitoring, logging)")
        .with_tags(["monitoring", "logging"])
        .with_service(
            PresetService::new("prometheus", "monitoring")
                .described("Prometheus metrics server")
                .with_image("prom/prometheus:latest")
                .with_port(tcp(9090))
                .with_volume(
                    VolumeConfig::bind("./prometheus.yml", "/etc/prometheus/prometheus.yml")
                        .read_only(),
                )
                .with_volume(VolumeConfig::named("prometheus_data", "/prometheus")),
        )
        .with_service(
            PresetService::new("grafana", "dashboard")
                .described("Grafana dashboards")
                .with_image("grafana/grafana:latest")
                .with_port(PortConfig::mapped(3000, 3000).with_protocol("tcp"))
                .with_volume(VolumeConfig::named("grafana_data", "/var/lib/grafana"))
                .with_env("GF_SECURITY_ADMIN_PASSWORD", "admin")
                .depending_on("prometheus"),
        )
        .with_service(
            PresetService::new("loki", "logging")
                .described("Loki log aggregation")
                .with_image("grafana/loki:latest")
                .with_port(tcp(3100))
                .optional(),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use infragen_core::domain::DomainValidator;

    #[test]
    fn every_builtin_preset_is_valid() {
        for preset in all_presets() {
            DomainValidator::validate_preset(&preset).unwrap();
        }
    }

    #[test]
    fn builtin_ids_are_sorted_and_unique() {
        let ids: Vec<_> = all_presets().into_iter().map(|p| p.id).collect();
        assert_eq!(
            ids,
            vec!["database", "infrastructure", "microservice", "ml", "web-app"]
        );
    }

    #[test]
    fn builtin_dependencies_resolve_within_preset() {
        for preset in all_presets() {
            for service in &preset.services {
                for dep in &service.depends_on {
                    assert!(
                        preset.services.iter().any(|s| &s.name == dep),
                        "{}: {} depends on unknown {}",
                        preset.id,
                        service.name,
                        dep
                    );
                }
            }
        }
    }

    #[test]
    fn web_app_matches_documented_shape() {
        let preset = web_app();
        let names: Vec<_> = preset.services.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["frontend", "api", "database"]);
        assert_eq!(preset.services[1].depends_on, vec!["database".to_string()]);
        assert!(preset.services[2].environment.contains_key("POSTGRES_PASSWORD"));
    }
}
