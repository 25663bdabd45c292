pub mod format;
pub mod request;
pub mod response;

pub use format::UploadFormat;
pub use request::{UploadCsvRequest, UploadRequest};
pub use response::{StagedUpload, UploadListResponse, UploadResponse, ValidationReport};

use crate::usecases::common::UseCaseMetadata;

pub struct UploadStaging;

impl UseCaseMetadata for UploadStaging {
    fn usecase_index() -> &'static str {
        "u510"
    }

    fn usecase_name() -> &'static str {
        "upload_staging"
    }

    fn display_name() -> &'static str {
        "Importar Dados"
    }

    fn description() -> &'static str {
        "Valida planilhas de vendas/produtos e guarda as linhas normalizadas"
    }
}
