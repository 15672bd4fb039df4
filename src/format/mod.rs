//! Textual rendering of the percentile distribution, in the layout shared by the HdrHistogram
//! implementations.

use std::io;
use std::io::Write;

use crate::core::counter::Counter;
use crate::Histogram;

/// Output layout for [`Histogram::output_percentile_distribution`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Format {
    /// Four right-aligned columns: value, percentile, total count and `1/(1-percentile)`, with
    /// the last column omitted on the terminal 100% row, followed by summary footer lines.
    PlainText,
    /// The same rows comma separated, with `Infinity` in the last column of the 100% row and no
    /// footer.
    Csv,
}

impl<T: Counter> Histogram<T> {
    /// Write the histogram's percentile distribution to `writer`.
    ///
    /// Values are divided by `value_scale` before printing, so a histogram recorded in
    /// nanoseconds can be reported in, say, milliseconds with `value_scale = 1_000_000.0`.
    /// Printed values carry as many decimals as the histogram has significant digits.
    /// `ticks_per_half_distance` controls how densely the percentile levels are sampled; 5 is
    /// the customary default.
    pub fn output_percentile_distribution<W: Write>(
        &self,
        writer: &mut W,
        value_scale: f64,
        ticks_per_half_distance: u32,
        format: Format,
    ) -> io::Result<()> {
        let digits = usize::from(self.sigfig());

        match format {
            Format::PlainText => writeln!(
                writer,
                "{:>12} {:>14} {:>10} {:>14}\n",
                "Value", "Percentile", "TotalCount", "1/(1-Percentile)"
            )?,
            Format::Csv => writeln!(writer, "Value,Percentile,TotalCount,1/(1-Percentile)")?,
        }

        for step in self.iter_percentiles(ticks_per_half_distance) {
            let value = step.value_iterated_to() as f64 / value_scale;
            let fraction = step.percentile_level_iterated_to() / 100.0;
            let total = step.total_count_to_this_value();

            if step.percentile_level_iterated_to() < 100.0 {
                let inverse = 1.0 / (1.0 - fraction);
                match format {
                    Format::PlainText => writeln!(
                        writer,
                        "{:12.digits$} {:14.12} {:10} {:14.2}",
                        value,
                        fraction,
                        total,
                        inverse,
                        digits = digits
                    )?,
                    Format::Csv => writeln!(
                        writer,
                        "{:.digits$},{:.12},{},{:.2}",
                        value,
                        fraction,
                        total,
                        inverse,
                        digits = digits
                    )?,
                }
            } else {
                match format {
                    Format::PlainText => writeln!(
                        writer,
                        "{:12.digits$} {:14.12} {:10}",
                        value,
                        fraction,
                        total,
                        digits = digits
                    )?,
                    Format::Csv => writeln!(
                        writer,
                        "{:.digits$},{:.12},{},Infinity",
                        value,
                        fraction,
                        total,
                        digits = digits
                    )?,
                }
            }
        }

        if let Format::PlainText = format {
            writeln!(
                writer,
                "#[Mean    = {:12.digits$}, StdDeviation   = {:12.digits$}]",
                self.mean() / value_scale,
                self.stdev() / value_scale,
                digits = digits
            )?;
            writeln!(
                writer,
                "#[Max     = {:12.digits$}, Total count    = {:12}]",
                self.max() as f64 / value_scale,
                self.count(),
                digits = digits
            )?;
            writeln!(
                writer,
                "#[Buckets = {:12}, SubBuckets     = {:12}]",
                self.buckets(),
                self.sub_bucket_count
            )?;
        }

        Ok(())
    }
}
