use umaocr_core::error::UmaError;
use umaocr_core::model::Record;

pub fn print(records: &[Record]) -> Result<(), UmaError> {
    let json = serde_json::to_string_pretty(records)?;
    println!("{json}");
    Ok(())
}
