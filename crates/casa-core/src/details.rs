//! # Receipt Details
//!
//! Turns a [`VerifiedReceipt`] into the display view printed on the
//! verification screen and in the receipt PDF.
//!
//! ```text
//! VerifiedReceipt ──► describe_receipt(options) ──► ReceiptDetails
//!                          │
//!                          ├── nights = ⌈(checkOut − checkIn) / 24h⌉
//!                          ├── dates  = "1 de enero de 2024, 14:00"
//!                          └── total  = "500.00" + currency
//! ```

use chrono::{DateTime, Datelike, FixedOffset, Offset, Timelike, Utc};

use crate::money::Money;
use crate::types::{
    GuestInfo, PaymentInfo, ReceiptDetails, ReceiptMetadata, ReservationInfo, VerificationStatus,
    VerifiedReceipt,
};
use crate::{DEFAULT_CURRENCY, RECEIPT_KIND_LABEL};

const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

const MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

// =============================================================================
// Display Options
// =============================================================================

/// How receipt details are rendered for people.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayOptions {
    /// Offset dates are shown in (and stats are grouped by).
    pub offset: FixedOffset,

    /// ISO 4217 currency code printed next to totals.
    pub currency: String,
}

impl DisplayOptions {
    /// Builds options from an offset in minutes east of UTC.
    ///
    /// Returns `None` when the offset is not within ±23:59.
    pub fn from_offset_minutes(minutes: i32, currency: impl Into<String>) -> Option<Self> {
        let offset = FixedOffset::east_opt(minutes.checked_mul(60)?)?;
        Some(DisplayOptions {
            offset,
            currency: currency.into(),
        })
    }

    /// Calendar day of `instant` in the display offset (`YYYY-MM-DD`).
    pub fn local_day(&self, instant: DateTime<Utc>) -> String {
        instant.with_timezone(&self.offset).date_naive().to_string()
    }
}

impl Default for DisplayOptions {
    fn default() -> Self {
        DisplayOptions {
            offset: Utc.fix(),
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

// =============================================================================
// Rendering
// =============================================================================

/// Builds the display view for a verified receipt.
pub fn describe_receipt(receipt: &VerifiedReceipt, options: &DisplayOptions) -> ReceiptDetails {
    let payload = &receipt.payload;
    let nights = stay_nights(receipt.check_in, receipt.check_out);

    ReceiptDetails {
        id: payload.id.clone(),
        kind: RECEIPT_KIND_LABEL.to_string(),
        client: GuestInfo {
            name: payload.client.clone(),
        },
        reservation: ReservationInfo {
            room: payload.room.clone(),
            check_in: long_date(receipt.check_in, options.offset),
            check_out: long_date(receipt.check_out, options.offset),
            nights,
            nights_text: if nights == 1 { "noche" } else { "noches" }.to_string(),
        },
        payment: PaymentInfo {
            total: format_total(payload.total),
            currency: options.currency.clone(),
        },
        metadata: ReceiptMetadata {
            generated_at: long_date(receipt.issued_at, options.offset),
            hash: receipt.hash.clone(),
            status: VerificationStatus::Verified,
        },
    }
}

/// Nights between check-in and check-out, any partial day counting as a
/// full night.
///
/// ```rust
/// use casa_core::details::stay_nights;
/// use chrono::{Duration, TimeZone, Utc};
///
/// let check_in = Utc.with_ymd_and_hms(2024, 1, 1, 14, 0, 0).unwrap();
/// assert_eq!(stay_nights(check_in, check_in + Duration::hours(3)), 1);
/// assert_eq!(stay_nights(check_in, check_in + Duration::hours(24)), 1);
/// assert_eq!(stay_nights(check_in, check_in + Duration::hours(25)), 2);
/// ```
pub fn stay_nights(check_in: DateTime<Utc>, check_out: DateTime<Utc>) -> i64 {
    let ms = (check_out - check_in).num_milliseconds();
    (ms + MS_PER_DAY - 1).div_euclid(MS_PER_DAY)
}

/// Long Spanish (Mexico) date-time: `"1 de enero de 2024, 14:00"`.
pub fn long_date(instant: DateTime<Utc>, offset: FixedOffset) -> String {
    let local = instant.with_timezone(&offset);
    format!(
        "{} de {} de {}, {:02}:{:02}",
        local.day(),
        MONTHS[local.month0() as usize],
        local.year(),
        local.hour(),
        local.minute()
    )
}

fn format_total(total: f64) -> String {
    Money::from_amount(total)
        .map(|money| money.to_plain_string())
        .unwrap_or_else(|_| format!("{total:.2}"))
}

// =============================================================================
// Unit Tests
// =============================================================================
