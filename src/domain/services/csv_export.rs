use crate::domain::models::report::Report;
use crate::error::AppError;
use chrono::SecondsFormat;
use csv::{QuoteStyle, Terminator, WriterBuilder};

pub const CSV_HEADER: [&str; 10] = [
    "id",
    "createdAt",
    "vehicleYear",
    "vehicleMake",
    "vehicleModel",
    "vehicleTrim",
    "mileage",
    "codesRaw",
    "complaint",
    "status",
];

/// Every field is quoted; embedded quotes are doubled.
pub fn reports_to_csv(reports: &[Report]) -> Result<Vec<u8>, AppError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER).map_err(csv_error)?;

    for r in reports {
        writer.write_record([
            r.id.clone(),
            r.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            r.vehicle_year.to_string(),
            r.vehicle_make.clone(),
            r.vehicle_model.clone(),
            r.vehicle_trim.clone().unwrap_or_default(),
            r.mileage.map(|m| m.to_string()).unwrap_or_default(),
            r.codes_raw.clone(),
            r.complaint.clone(),
            r.status.clone(),
        ]).map_err(csv_error)?;
    }

    writer.into_inner().map_err(|e| AppError::InternalWithMsg(format!("CSV flush failed: {}", e)))
}

fn csv_error(e: csv::Error) -> AppError {
    AppError::InternalWithMsg(format!("CSV write failed: {}", e))
}
