//! Root style generation for prerender hosts.
//!
//! Renders the preference-driven style variables into a `:root { ... }`
//! block so a server-rendered page starts out in the visitor's state.
//! Every value passes a numeric sanitizer first; anything else is dropped.

// =============================================================================
// VALIDATION
// =============================================================================

const UNITS: [&str; 5] = ["px", "rem", "em", "deg", "%"];

/// Validate a CSS numeric value with an optional unit (`14px`, `250`,
/// `1.5rem`, `-0.1`).
pub fn validate_css_numeric(value: &str) -> Result<(), String> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err("Empty CSS numeric value".to_string());
    }

    check_injection_patterns(trimmed)?;

    let numeric_part = UNITS
        .iter()
        .find_map(|unit| trimmed.strip_suffix(unit))
        .unwrap_or(trimmed);

    match numeric_part.parse::<f64>() {
        Ok(number) if number.is_finite() => Ok(()),
        _ => Err(format!("Invalid CSS numeric value: '{trimmed}'")),
    }
}

/// Validate a custom property name: `--` followed by letters, digits,
/// hyphens or underscores.
pub fn validate_css_property_name(name: &str) -> Result<(), String> {
    let Some(rest) = name.strip_prefix("--") else {
        return Err(format!("CSS custom property must start with '--': '{name}'"));
    };
    if rest.is_empty() {
        return Err("Empty CSS custom property name".to_string());
    }
    if let Some(ch) = rest
        .chars()
        .find(|ch| !ch.is_ascii_alphanumeric() && *ch != '-' && *ch != '_')
    {
        return Err(format!("Invalid character '{ch}' in property name '{name}'"));
    }
    Ok(())
}

fn check_injection_patterns(value: &str) -> Result<(), String> {
    let lower = value.to_lowercase();

    let dangerous = [
        "expression(",
        "url(",
        "javascript:",
        "eval(",
        "import",
        "</style",
    ];
    for pattern in &dangerous {
        if lower.contains(pattern) {
            return Err(format!("CSS injection pattern detected: '{pattern}'"));
        }
    }

    let forbidden = [';', '{', '}', '<', '>', '@', '\\'];
    if let Some(ch) = value.chars().find(|ch| forbidden.contains(ch)) {
        return Err(format!("Forbidden character '{ch}' in CSS value"));
    }

    Ok(())
}

// =============================================================================
// GENERATION
// =============================================================================

/// Generate a `:root { ... }` block from `(name, value)` pairs. Pairs that
/// fail validation are skipped with a warning.
pub fn generate_css_root<S: AsRef<str>>(variables: &[(&str, S)]) -> String {
    let mut css = String::from(":root {\n");

    for (name, value) in variables {
        let value = value.as_ref();
        let validation =
            validate_css_property_name(name).and_then(|()| validate_css_numeric(value));
        match validation {
            Ok(()) => {
                css.push_str(&format!("  {name}: {};\n", value.trim()));
            }
            Err(e) => {
                tracing::warn!(name, value, error = %e, "style variable rejected by sanitizer");
            }
        }
    }

    css.push('}');
    css
}
