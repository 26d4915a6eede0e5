//! Renderers turning quote snapshots into terminal output.
use std::io::Write;

use price_common::display::QuoteView;
use price_common::{Quote, Result};

/// Output sink for quote updates.
pub trait Render {
    /// Render one snapshot.
    fn render(&mut self, quote: &Quote) -> Result<()>;
}

/// One human-readable line per update, e.g.
/// `SOL/USD  $150.26  3.21% ▲  (updated 12:00:00 UTC)`.
pub struct TextRenderer<W: Write> {
    out: W,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Render for TextRenderer<W> {
    fn render(&mut self, quote: &Quote) -> Result<()> {
        let view = QuoteView::from(quote);
        let pair = format!(
            "{}/{}",
            quote.asset.symbol(),
            quote.currency.to_string().to_uppercase()
        );
        let arrow = view.trend.map(|t| t.arrow()).unwrap_or(" ");

        write!(self.out, "{:<10} {:>14} {:>9} {}", pair, view.price, view.change, arrow)?;
        if let Some(at) = quote.updated_at {
            write!(self.out, "  (updated {})", at.format("%H:%M:%S UTC"))?;
        }
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}

/// One JSON object per line.
pub struct JsonRenderer<W: Write> {
    out: W,
}

impl<W: Write> JsonRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Render for JsonRenderer<W> {
    fn render(&mut self, quote: &Quote) -> Result<()> {
        self.out.write_all(&quote.to_json_bytes()?)?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}
