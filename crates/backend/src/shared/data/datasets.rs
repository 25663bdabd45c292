use std::collections::BTreeMap;

use contracts::projections::p910_monthly_sales::MonthlySales;
use contracts::projections::p911_daily_sales::DailySales;
use contracts::projections::p912_products::Product;
use contracts::projections::p913_calendar::CalendarDay;
use contracts::projections::p914_yoy::YoyRow;
use contracts::projections::p915_erosion_alerts::ErosionAlert;
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::acquisition::{AcquisitionError, DatasetName, RawDatasets};

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("dataset {0} is missing from the acquired set")]
    Missing(DatasetName),

    #[error("dataset {dataset} does not match the expected row shape: {source}")]
    Decode {
        dataset: DatasetName,
        #[source]
        source: serde_json::Error,
    },
}

/// Any failure that leaves the server without datasets.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Acquisition(#[from] AcquisitionError),

    #[error(transparent)]
    Dataset(#[from] DatasetError),
}

/// Typed, immutable snapshot of the six exported aggregates.
#[derive(Debug, Clone, Default)]
pub struct Datasets {
    pub monthly_sales: Vec<MonthlySales>,
    pub daily_sales: Vec<DailySales>,
    pub products: Vec<Product>,
    pub calendar: Vec<CalendarDay>,
    pub yoy: Vec<YoyRow>,
    pub erosion: Vec<ErosionAlert>,
}

impl Datasets {
    pub fn from_raw(mut raw: RawDatasets) -> Result<Self, DatasetError> {
        Ok(Self {
            monthly_sales: take(&mut raw, DatasetName::MonthlySales)?,
            daily_sales: take(&mut raw, DatasetName::DailySales)?,
            products: take(&mut raw, DatasetName::Products)?,
            calendar: take(&mut raw, DatasetName::Calendar)?,
            yoy: take(&mut raw, DatasetName::Yoy)?,
            erosion: take(&mut raw, DatasetName::Erosion)?,
        })
    }

    /// Row count per file stem
    pub fn row_counts(&self) -> BTreeMap<String, usize> {
        [
            (DatasetName::MonthlySales, self.monthly_sales.len()),
            (DatasetName::DailySales, self.daily_sales.len()),
            (DatasetName::Products, self.products.len()),
            (DatasetName::Calendar, self.calendar.len()),
            (DatasetName::Yoy, self.yoy.len()),
            (DatasetName::Erosion, self.erosion.len()),
        ]
        .into_iter()
        .map(|(name, count)| (name.file_stem().to_string(), count))
        .collect()
    }
}

fn take<T: DeserializeOwned>(raw: &mut RawDatasets, dataset: DatasetName) -> Result<Vec<T>, DatasetError> {
    let value = raw.remove(&dataset).ok_or(DatasetError::Missing(dataset))?;
    serde_json::from_value(value).map_err(|source| DatasetError::Decode { dataset, source })
}
