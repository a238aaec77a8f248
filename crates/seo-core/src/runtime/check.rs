//! Detection of the external programs a generated project needs

use anyhow::Result;
use std::fmt;
use std::process::Command;

/// External programs the scaffolder drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Runtime {
    Python,
    Git,
}

impl Runtime {
    pub fn display_name(&self) -> &'static str {
        match self {
            Runtime::Python => "Python 3",
            Runtime::Git => "Git",
        }
    }

    fn install_hint(&self) -> &'static str {
        match self {
            Runtime::Python => "Python 3 (install from https://python.org)",
            Runtime::Git => "Git (install from https://git-scm.com)",
        }
    }
}

impl fmt::Display for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Runtime detection result
#[derive(Debug, Clone)]
pub struct RuntimeInfo {
    pub runtime: Runtime,
    pub version: Option<String>,
    pub available: bool,
}

impl RuntimeInfo {
    pub fn describe(&self) -> String {
        if self.available {
            format!(
                "{} ({})",
                self.runtime,
                self.version.as_deref().unwrap_or("unknown")
            )
        } else {
            format!("{} (not installed)", self.runtime)
        }
    }
}

fn probe(runtime: Runtime, program: &str) -> RuntimeInfo {
    let output = Command::new(program).arg("--version").output();

    match output {
        Ok(out) if out.status.success() => {
            // Old Pythons print their version on stderr
            let raw = if out.stdout.is_empty() {
                out.stderr
            } else {
                out.stdout
            };
            RuntimeInfo {
                runtime,
                version: Some(String::from_utf8_lossy(&raw).trim().to_string()),
                available: true,
            }
        }
        _ => RuntimeInfo {
            runtime,
            version: None,
            available: false,
        },
    }
}

/// Check if the given Python interpreter is available
pub fn check_python(python: &str) -> RuntimeInfo {
    probe(Runtime::Python, python)
}

/// Check if Git is available
pub fn check_git() -> RuntimeInfo {
    probe(Runtime::Git, "git")
}

/// Check runtimes; those in `advisory` are reported but never cause failure.
pub fn check_runtimes_with_advisory(
    python: &str,
    required: &[Runtime],
    advisory: &[Runtime],
) -> Result<Vec<RuntimeInfo>> {
    let mut results = Vec::new();
    let mut missing = Vec::new();

    for runtime in required.iter().chain(advisory.iter()) {
        if results.iter().any(|r: &RuntimeInfo| r.runtime == *runtime) {
            continue;
        }
        let info = match runtime {
            Runtime::Python => check_python(python),
            Runtime::Git => check_git(),
        };
        if !info.available && required.contains(runtime) {
            missing.push(runtime.install_hint());
        }
        results.push(info);
    }

    if !missing.is_empty() {
        anyhow::bail!(
            "Missing required runtimes:\n{}",
            missing
                .iter()
                .map(|m| format!("  - {}", m))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program_reported_unavailable() {
        let info = check_python("seo-definitely-not-a-python");
        assert!(!info.available);
        assert_eq!(info.describe(), "Python 3 (not installed)");
    }

    #[test]
    fn test_missing_required_runtime_fails() {
        let err =
            check_runtimes_with_advisory("seo-definitely-not-a-python", &[Runtime::Python], &[])
                .unwrap_err();
        assert!(err.to_string().contains("python.org"));
    }

    #[test]
    fn test_missing_advisory_runtime_is_reported() {
        let results =
            check_runtimes_with_advisory("seo-definitely-not-a-python", &[], &[Runtime::Python])
                .unwrap();
        assert_eq!(results.len(), 1);
        assert!(!results[0].available);
    }
}
