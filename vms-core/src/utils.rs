//! Delimited-row parsing helpers.
//!
//! The transcript format is a plain comma-delimited record file, so the
//! only machinery needed here is a single-row field splitter that honors
//! CSV quoting.

use csv_core::ReadFieldResult;

/// Splits one delimited row into its fields.
///
/// Double-quoted fields and embedded commas are handled per the CSV rules.
///
/// # Arguments
///
/// * `row` - The row to split, without its line terminator.
///
/// # Returns
///
/// The fields of the row, in order.
///
/// # Examples
///
/// ```
/// # use vms_core::utils::split_row;
/// let fields = split_row("daiin,f1r,herbal");
/// assert_eq!(fields, vec!["daiin", "f1r", "herbal"]);
///
/// let quoted = split_row("daiin,\"f1r,f1v\",herbal");
/// assert_eq!(quoted, vec!["daiin", "f1r,f1v", "herbal"]);
/// ```
pub fn split_row(row: &str) -> Vec<String> {
    let mut fields = vec![];
    // A field longer than the output buffer arrives in several reads and
    // may be cut mid-glyph, so bytes are accumulated and converted only
    // once the field is complete.
    let mut field = Vec::new();
    let mut rdr = csv_core::Reader::new();
    let mut bytes = row.as_bytes();
    let mut output = [0; 4096];
    loop {
        let (result, nin, nout) = rdr.read_field(bytes, &mut output);
        field.extend_from_slice(&output[..nout]);
        bytes = &bytes[nin..];
        match result {
            ReadFieldResult::OutputFull => continue,
            ReadFieldResult::Field { .. } => {
                fields.push(String::from_utf8(std::mem::take(&mut field)).unwrap());
            }
            ReadFieldResult::InputEmpty | ReadFieldResult::End => {
                fields.push(String::from_utf8(std::mem::take(&mut field)).unwrap());
                break;
            }
        }
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_row() {
        assert_eq!(
            &["qokaiin", "f75r", "bio"],
            split_row("qokaiin,f75r,bio").as_slice()
        );
    }

    #[test]
    fn test_split_row_with_quote() {
        assert_eq!(
            &["daiin", "f1r,f1v"],
            split_row("daiin,\"f1r,f1v\"").as_slice()
        );
    }

    #[test]
    fn test_split_row_empty_fields() {
        assert_eq!(&["a", "", "c"], split_row("a,,c").as_slice());
    }

    #[test]
    fn test_split_row_field_longer_than_buffer() {
        let long = "o".repeat(5000);
        let fields = split_row(&format!("daiin,{long},f1r"));
        assert_eq!(3, fields.len());
        assert_eq!("daiin", fields[0]);
        assert_eq!(long, fields[1]);
        assert_eq!("f1r", fields[2]);
    }

    #[test]
    fn test_split_row_long_field_cut_mid_glyph() {
        // Two-byte glyphs guarantee the internal buffer boundary falls
        // inside a glyph at some read.
        let long = "ö".repeat(3000);
        let fields = split_row(&format!("{long},f1r"));
        assert_eq!(2, fields.len());
        assert_eq!(long, fields[0]);
    }
}
