pub(crate) fn resolve_string(
    cli_value: Option<String>,
    env_name: &str,
    settings_value: Option<&str>,
    default: &str,
) -> String {
    resolve_optional_string(cli_value, env_name, settings_value)
        .unwrap_or_else(|| default.to_string())
}

pub(crate) fn resolve_optional_string(
    cli_value: Option<String>,
    env_name: &str,
    settings_value: Option<&str>,
) -> Option<String> {
    if let Some(value) = cli_value {
        return Some(value);
    }
    if let Ok(value) = std::env::var(env_name)
        && !value.trim().is_empty()
    {
        return Some(value.trim().to_string());
    }
    settings_value.map(ToString::to_string)
}

pub(crate) fn resolve_optional_positive_usize(
    cli_value: Option<usize>,
    env_name: &str,
    settings_value: Option<usize>,
) -> Option<usize> {
    if let Some(value) = cli_value
        && value > 0
    {
        return Some(value);
    }
    if let Some(value) = parse_positive_usize_from_env(env_name) {
        return Some(value);
    }
    settings_value.filter(|value| *value > 0)
}

fn parse_positive_usize_from_env(name: &str) -> Option<usize> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse::<usize>() {
        Ok(value) if value > 0 => Some(value),
        _ => {
            tracing::warn!(env_var = %name, value = %raw, "invalid positive integer env value; ignoring");
            None
        }
    }
}
