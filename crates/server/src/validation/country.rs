/// Normalize an ISO 3166-1 alpha-2 country code.
///
/// Blank input means "no country" and yields `Ok(None)`.
pub fn normalize_country_code(raw: &str) -> Result<Option<String>, String> {
    let code = raw.trim();
    if code.is_empty() {
        return Ok(None);
    }

    if code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(format!("'{code}' is not a two-letter country code"));
    }

    Ok(Some(code.to_ascii_uppercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_country_is_none() {
        assert_eq!(normalize_country_code(""), Ok(None));
        assert_eq!(normalize_country_code("   "), Ok(None));
    }

    #[test]
    fn test_country_is_uppercased() {
        assert_eq!(normalize_country_code("hr"), Ok(Some("HR".to_string())));
        assert_eq!(normalize_country_code(" It "), Ok(Some("IT".to_string())));
    }

    #[test]
    fn test_invalid_country_codes() {
        assert!(normalize_country_code("ITA").is_err());
        assert!(normalize_country_code("I").is_err());
        assert!(normalize_country_code("1T").is_err());
        assert!(normalize_country_code("é").is_err());
    }
}
