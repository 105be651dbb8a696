//! Project name validation using npm package naming rules
//!
//! A project name must be usable as the `name` of a new npm package. Errors
//! and warnings from the registry rules are both disqualifying here, since
//! the scaffolded project is always a new package.

use thiserror::Error;

/// Names the registry refuses outright
const BLACKLIST: &[&str] = &["node_modules", "favicon.ico"];

/// Node.js core modules, which new packages may not shadow
const CORE_MODULES: &[&str] = &[
    "assert",
    "async_hooks",
    "buffer",
    "child_process",
    "cluster",
    "console",
    "constants",
    "crypto",
    "dgram",
    "diagnostics_channel",
    "dns",
    "domain",
    "events",
    "fs",
    "http",
    "http2",
    "https",
    "inspector",
    "module",
    "net",
    "os",
    "path",
    "perf_hooks",
    "process",
    "punycode",
    "querystring",
    "readline",
    "repl",
    "stream",
    "string_decoder",
    "sys",
    "timers",
    "tls",
    "trace_events",
    "tty",
    "url",
    "util",
    "v8",
    "vm",
    "wasi",
    "worker_threads",
    "zlib",
];

const MAX_NAME_LENGTH: usize = 214;

/// Ordered list of naming violations for a rejected name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("could not create a project called \"{name}\" because of npm naming restrictions")]
pub struct ValidationErrors {
    pub name: String,
    pub problems: Vec<String>,
}

impl ValidationErrors {
    /// Render the diagnostic block printed before the process exits
    pub fn report(&self) -> String {
        let mut out = format!(
            "Could not create a project called \"{}\" because of npm naming restrictions:\n",
            self.name
        );
        for problem in &self.problems {
            out.push_str(&format!("\n  * {}", problem));
        }
        out
    }
}

/// Check a candidate project name against npm package naming rules
pub fn validate(name: &str) -> Result<(), ValidationErrors> {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if name.is_empty() {
        errors.push("name length must be greater than zero".to_string());
    }
    if name.starts_with('.') {
        errors.push("name cannot start with a period".to_string());
    }
    if name.starts_with('_') {
        errors.push("name cannot start with an underscore".to_string());
    }
    if name.trim() != name {
        errors.push("name cannot contain leading or trailing spaces".to_string());
    }

    let lowered = name.to_lowercase();
    for blacklisted in BLACKLIST {
        if lowered == *blacklisted {
            errors.push(format!("{} is a blacklisted name", blacklisted));
        }
    }
    for core in CORE_MODULES {
        if lowered == *core {
            warnings.push(format!("{} is a core module name", core));
        }
    }

    // Registry lengths are counted in UTF-16 code units
    if name.encode_utf16().count() > MAX_NAME_LENGTH {
        warnings.push(format!(
            "name can no longer contain more than {} characters",
            MAX_NAME_LENGTH
        ));
    }
    if lowered != name {
        warnings.push("name can no longer contain capital letters".to_string());
    }

    let last_segment = name.rsplit('/').next().unwrap_or(name);
    if last_segment.chars().any(|c| "~'!()*".contains(c)) {
        warnings.push("name can no longer contain special characters (\"~'!()*\")".to_string());
    }

    if !is_url_friendly(name) && !is_url_friendly_scoped(name) {
        errors.push("name can only contain URL-friendly characters".to_string());
    }

    if errors.is_empty() && warnings.is_empty() {
        return Ok(());
    }

    errors.extend(warnings);
    Err(ValidationErrors {
        name: name.to_string(),
        problems: errors,
    })
}

/// True when percent-encoding would leave the string unchanged
fn is_url_friendly(s: &str) -> bool {
    s.chars()
        .all(|c| c.is_ascii_alphanumeric() || "-_.!~*'()".contains(c))
}

/// `@scope/package` with both halves URL-friendly
fn is_url_friendly_scoped(name: &str) -> bool {
    let Some(rest) = name.strip_prefix('@') else {
        return false;
    };
    match rest.split_once('/') {
        Some((scope, package)) => {
            !scope.is_empty()
                && !package.is_empty()
                && !package.contains('/')
                && is_url_friendly(scope)
                && is_url_friendly(package)
        }
        None => false,
    }
}
