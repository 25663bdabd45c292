/// Identifies a use case in logs and API routes
pub trait UseCaseMetadata {
    /// Index (e.g., "u510")
    fn usecase_index() -> &'static str;

    /// Technical name (e.g., "upload_staging")
    fn usecase_name() -> &'static str;

    /// Label shown to the store owner
    fn display_name() -> &'static str;

    fn description() -> &'static str {
        ""
    }

    /// "u510_upload_staging"
    fn full_name() -> String {
        format!("{}_{}", Self::usecase_index(), Self::usecase_name())
    }
}
