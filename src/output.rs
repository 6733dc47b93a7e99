use std::io::Write;

use crate::app::{Content, Region, Surface};
use crate::error::AppError;

/// Write the surface to `writer`, as pretty JSON or as plain text with
/// tab-separated transaction rows.
pub fn write_surface<W: Write>(
    writer: &mut W,
    surface: &Surface,
    json_mode: bool,
) -> Result<(), AppError> {
    if json_mode {
        serde_json::to_writer_pretty(&mut *writer, surface)?;
        writeln!(writer)?;
        writer.flush()?;
        return Ok(());
    }

    writeln!(writer, "# {}", surface.title)?;
    for (region, content) in &surface.regions {
        match content {
            Content::Text(text) if text.is_empty() => {}
            Content::Text(text) => writeln!(writer, "{}\t{}", region.id(), text)?,
            Content::Rows(rows) => {
                writeln!(writer, "{}\t{}", region.id(), rows.len())?;
                for row in rows {
                    writeln!(writer, "  {}\t{}\t{}", row.date, row.object, row.amount)?;
                }
            }
        }
    }
    if let Some(form) = &surface.dialog {
        writeln!(writer, "dialog\t{}\t{}\t{}", form.date, form.object, form.amount)?;
    }
    writer.flush()?;
    Ok(())
}

/// Balance with its currency label, when the dashboard shows one.
pub fn balance_line(surface: &Surface) -> Option<String> {
    let balance = surface.text(Region::Balance)?;
    let currency = surface.text(Region::Currency).unwrap_or_default();
    Some(format!("{balance} {currency}").trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{Renderer, TransactionRow, View};

    fn dashboard() -> Surface {
        let mut surface = Surface::new();
        surface.mount(View::Dashboard);
        surface.set_title("My Account");
        surface.update_region(Region::Balance, Content::Text("109.99".into()));
        surface.update_region(Region::Currency, Content::Text("$".into()));
        surface.update_region(
            Region::Transactions,
            Content::Rows(vec![TransactionRow {
                date: "2024-01-16".into(),
                object: "Refund".into(),
                amount: "9.99".into(),
            }]),
        );
        surface
    }

    #[test]
    fn test_text_output() {
        let mut out = Vec::new();
        write_surface(&mut out, &dashboard(), false).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("# My Account\n"));
        assert!(text.contains("balance\t109.99\n"));
        assert!(text.contains("  2024-01-16\tRefund\t9.99\n"));
    }

    #[test]
    fn test_json_output() {
        let mut out = Vec::new();
        write_surface(&mut out, &dashboard(), true).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["title"], "My Account");
        assert_eq!(value["regions"]["transactions"][0]["amount"], "9.99");
    }

    #[test]
    fn test_balance_line() {
        assert_eq!(balance_line(&dashboard()).as_deref(), Some("109.99 $"));
        assert_eq!(balance_line(&Surface::new()), None);
    }
}
