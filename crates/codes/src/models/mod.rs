mod analysis;
mod category;
mod code;
mod lookup;
mod record;

pub use self::analysis::Analysis;
pub use self::category::Category;
pub use self::code::Code;
pub use self::lookup::LookupResult;
pub use self::record::CodeRecord;

fn sanitize(s: impl AsRef<str>) -> String {
    s.as_ref().trim().to_lowercase().replace(['/', '-', '_', ' '], "")
}
