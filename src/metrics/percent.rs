/// Share of `part` in `whole` as a percentage, or 0.0 when `whole` is zero.
#[expect(clippy::cast_precision_loss, reason = "acceptable for percentages")]
#[must_use]
pub fn percentage(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }

    part as f64 / whole as f64 * 100.0
}
