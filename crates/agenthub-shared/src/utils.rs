//! Utility functions

/// Normalize a tenant identifier: lowercase, trimmed, spaces replaced by
/// hyphens. Applied on creation and on every lookup so `"My Client"` and
/// `"my-client"` address the same record.
pub fn normalize_tenant_id(raw: &str) -> String {
    raw.to_lowercase().trim().replace(' ', "-")
}

/// Counts characters, not bytes: provider-supplied addresses may start with
/// a multi-byte character or have an empty local part.
pub fn mask_email(email: &str) -> String {
    let Some((local, domain)) = email.split_once('@') else {
        return "***".to_string();
    };
    let keep = if local.chars().count() > 2 { 2 } else { 1 };
    let prefix: String = local.chars().take(keep).collect();
    format!("{}***@{}", prefix, domain)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case_whitespace_and_spaces() {
        assert_eq!(normalize_tenant_id("My Client"), "my-client");
        assert_eq!(normalize_tenant_id("  Acme Corp  "), "acme-corp");
        assert_eq!(normalize_tenant_id("already-normal"), "already-normal");
    }

    #[test]
    fn masks_email_local_part() {
        assert_eq!(mask_email("alice@example.com"), "al***@example.com");
        assert_eq!(mask_email("a@example.com"), "a***@example.com");
        assert_eq!(mask_email("not-an-email"), "***");
    }

    #[test]
    fn masking_handles_degenerate_local_parts() {
        assert_eq!(mask_email("@example.com"), "***@example.com");
        assert_eq!(mask_email("émile@example.com"), "ém***@example.com");
        assert_eq!(mask_email("é@example.com"), "é***@example.com");
    }
}
