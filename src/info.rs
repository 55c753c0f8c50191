use crate::refs::{ObjectReferences, RefType};
use chrono::{DateTime, Datelike, Local, Timelike};
use pdf_writer::{Date as PDate, Pdf, TextStr};

const SUBJECT: &str = "Handwritten note";

/// Metadata written into the information dictionary of an exported PDF
#[derive(Debug, Clone, PartialEq)]
pub struct Info {
    /// Usually the title written at the top of the first page
    pub title: Option<String>,
    pub subject: String,
    pub created: DateTime<Local>,
}

impl Info {
    /// Metadata for a note created now
    pub fn new(title: Option<String>) -> Info {
        Info {
            title,
            subject: SUBJECT.to_string(),
            created: Local::now(),
        }
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, writer: &mut Pdf) {
        let mut info = writer.document_info(refs.gen(RefType::Info));
        if let Some(title) = self.title.as_deref() {
            info.title(TextStr(title));
        }
        info.subject(TextStr(&self.subject));
        info.creator(TextStr(concat!(
            env!("CARGO_PKG_NAME"),
            " v",
            env!("CARGO_PKG_VERSION")
        )));
        info.creation_date(pdf_date(&self.created));
    }
}

fn pdf_date(time: &DateTime<Local>) -> PDate {
    let offset_minutes = time.offset().local_minus_utc() / 60;
    PDate::new(time.year() as u16)
        .month(time.month() as u8)
        .day(time.day() as u8)
        .hour(time.hour() as u8)
        .minute(time.minute() as u8)
        .second(time.second() as u8)
        .utc_offset_hour((offset_minutes / 60) as i8)
        .utc_offset_minute((offset_minutes % 60).unsigned_abs() as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_title_subject_and_creation_date() {
        let info = Info {
            subject: "Chemistry".into(),
            ..Info::new(Some("Notes".into()))
        };
        let mut pdf = Pdf::new();
        info.write(&mut ObjectReferences::new(), &mut pdf);
        let bytes = pdf.finish();
        let raw = String::from_utf8_lossy(&bytes);
        assert!(raw.contains("/Title (Notes)"));
        assert!(raw.contains("/Subject (Chemistry)"));
        assert!(raw.contains("/CreationDate (D:"));
    }
}
