/// Lookup seam for the external item-definition database.
///
/// The database itself lives outside this crate; diagnostics only need a
/// record-path-to-display-name mapping, so that is all the seam asks for.
pub trait ItemResolver {
    fn resolve(&self, base_name: &str) -> Option<String>;
}

/// Fallback resolver for when no database is wired up: derives a readable
/// name from the record path itself.
///
/// `records\item\equipmentweapon\sword\sw_05.dbr` resolves to `sw 05`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RecordPathResolver;

impl ItemResolver for RecordPathResolver {
    fn resolve(&self, base_name: &str) -> Option<String> {
        let stem = base_name
            .rsplit(['\\', '/'])
            .next()
            .unwrap_or(base_name)
            .trim_end_matches(".dbr");
        if stem.is_empty() {
            return None;
        }
        Some(stem.replace('_', " "))
    }
}

#[cfg(test)]
mod tests {
    use super::{ItemResolver, RecordPathResolver};

    #[test]
    fn derives_name_from_record_path() {
        let resolver = RecordPathResolver;
        assert_eq!(
            resolver.resolve("records\\item\\equipmentweapon\\sword\\sw_05.dbr"),
            Some("sw 05".to_string())
        );
    }

    #[test]
    fn empty_record_path_resolves_to_none() {
        assert_eq!(RecordPathResolver.resolve(""), None);
    }
}
