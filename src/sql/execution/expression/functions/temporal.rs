//! Date/time arithmetic: FROM_UNIXTIME, UNIX_TIMESTAMP and TIMESTAMPDIFF.
//!
//! Timestamps cross the host boundary as signed microseconds since the
//! PostgreSQL epoch (2000-01-01 00:00:00 UTC). Calendar fields are always
//! read in the session time zone from [`CompatConfig`].
//!
//! [`CompatConfig`]: crate::sql::config::CompatConfig

use super::{arg_i64, arg_text, arg_timestamp};
use crate::register_sql_function;
use crate::sql::error::{SqlError, SqlResult};
use crate::sql::execution::context::FunctionContext;
use crate::sql::execution::expression::function_metadata::{
    FunctionCategory, FunctionSignature, ParamKind, ReturnKind, Volatility,
};
use crate::sql::execution::types::{FieldValue, ValueKind};
use chrono::{DateTime, Datelike, FixedOffset, Timelike, Utc, Weekday};
use std::fmt;
use std::str::FromStr;

/// Days between 1970-01-01 and 2000-01-01
pub const POSTGRES_EPOCH_OFFSET_DAYS: i64 = 10_957;
pub const MICROS_PER_SECOND: i64 = 1_000_000;
pub const MICROS_PER_DAY: i64 = 86_400 * MICROS_PER_SECOND;

const POSTGRES_EPOCH_OFFSET_MICROS: i64 = POSTGRES_EPOCH_OFFSET_DAYS * MICROS_PER_DAY;

/// Microseconds since 2000-01-01 UTC for an instant
pub fn to_host_micros(ts: &DateTime<Utc>) -> Option<i64> {
    ts.timestamp_micros().checked_sub(POSTGRES_EPOCH_OFFSET_MICROS)
}

/// Instant for microseconds since 2000-01-01 UTC, if representable
pub fn from_host_micros(micros: i64) -> Option<DateTime<Utc>> {
    micros
        .checked_add(POSTGRES_EPOCH_OFFSET_MICROS)
        .and_then(DateTime::from_timestamp_micros)
}

/// Year/month/day/time decomposition of an instant in a given zone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarBreakdown {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub microsecond: u32,
    pub weekday: Weekday,
}

impl CalendarBreakdown {
    pub fn from_timestamp(ts: &DateTime<Utc>, zone: &FixedOffset) -> Self {
        let local = ts.with_timezone(zone);
        Self {
            year: local.year(),
            month: local.month(),
            day: local.day(),
            hour: local.hour(),
            minute: local.minute(),
            second: local.second(),
            // leap-second nanos fold into the last microsecond
            microsecond: (local.nanosecond() / 1_000).min(999_999),
            weekday: local.weekday(),
        }
    }

    /// English weekday name, `Sunday`..`Saturday`
    pub fn weekday_name(&self) -> &'static str {
        match self.weekday {
            Weekday::Mon => "Monday",
            Weekday::Tue => "Tuesday",
            Weekday::Wed => "Wednesday",
            Weekday::Thu => "Thursday",
            Weekday::Fri => "Friday",
            Weekday::Sat => "Saturday",
            Weekday::Sun => "Sunday",
        }
    }

    /// Months since year 0, for calendar-field differencing
    fn month_index(&self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month)
    }

    /// Position within the month, ordered lexicographically
    fn intra_month(&self) -> (u32, u32, u32, u32, u32) {
        (self.day, self.hour, self.minute, self.second, self.microsecond)
    }
}

/// Units accepted by TIMESTAMPDIFF
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Microsecond,
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl TimeUnit {
    pub const ALL: [TimeUnit; 8] = [
        TimeUnit::Microsecond,
        TimeUnit::Second,
        TimeUnit::Minute,
        TimeUnit::Hour,
        TimeUnit::Day,
        TimeUnit::Week,
        TimeUnit::Month,
        TimeUnit::Year,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TimeUnit::Microsecond => "MICROSECOND",
            TimeUnit::Second => "SECOND",
            TimeUnit::Minute => "MINUTE",
            TimeUnit::Hour => "HOUR",
            TimeUnit::Day => "DAY",
            TimeUnit::Week => "WEEK",
            TimeUnit::Month => "MONTH",
            TimeUnit::Year => "YEAR",
        }
    }

    /// Length in microseconds for units of fixed duration
    pub fn fixed_micros(&self) -> Option<i64> {
        match self {
            TimeUnit::Microsecond => Some(1),
            TimeUnit::Second => Some(MICROS_PER_SECOND),
            TimeUnit::Minute => Some(60 * MICROS_PER_SECOND),
            TimeUnit::Hour => Some(3_600 * MICROS_PER_SECOND),
            TimeUnit::Day => Some(MICROS_PER_DAY),
            TimeUnit::Week => Some(7 * MICROS_PER_DAY),
            TimeUnit::Month | TimeUnit::Year => None,
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TimeUnit {
    type Err = SqlError;

    /// Case-insensitive; accepts `SQL_TSI_` prefixes and plural forms.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        let bare = upper.strip_prefix("SQL_TSI_").unwrap_or(&upper);
        let singular = bare.strip_suffix('S').unwrap_or(bare);

        TimeUnit::ALL
            .into_iter()
            .find(|unit| unit.name() == bare || unit.name() == singular)
            .ok_or_else(|| {
                SqlError::execution_error(
                    "TIMESTAMPDIFF",
                    format!(
                        "Unsupported unit '{}'. Supported units: MICROSECOND, SECOND, MINUTE, HOUR, DAY, WEEK, MONTH, YEAR",
                        s
                    ),
                )
            })
    }
}

/// Whole `unit`s from `start` to `end`.
///
/// Fixed units truncate toward zero. Months count complete calendar months
/// in `zone`: the field difference, less one step toward zero when the end
/// has not yet reached the start's day and time of month. Years are whole
/// months divided by twelve. `None` when the result does not fit in i64.
pub fn timestamp_diff(
    unit: TimeUnit,
    start: &DateTime<Utc>,
    end: &DateTime<Utc>,
    zone: &FixedOffset,
) -> Option<i64> {
    if let Some(unit_micros) = unit.fixed_micros() {
        let diff = i128::from(end.timestamp_micros()) - i128::from(start.timestamp_micros());
        return i64::try_from(diff / i128::from(unit_micros)).ok();
    }

    let months = complete_months(
        &CalendarBreakdown::from_timestamp(start, zone),
        &CalendarBreakdown::from_timestamp(end, zone),
    );
    match unit {
        TimeUnit::Year => Some(months / 12),
        _ => Some(months),
    }
}

fn complete_months(start: &CalendarBreakdown, end: &CalendarBreakdown) -> i64 {
    let months = end.month_index() - start.month_index();
    if months > 0 && end.intra_month() < start.intra_month() {
        months - 1
    } else if months < 0 && end.intra_month() > start.intra_month() {
        months + 1
    } else {
        months
    }
}

/// FROM_UNIXTIME(t): timestamp `t` seconds after 1970-01-01 UTC.
///
/// Yields NULL when the instant is outside the representable range.
pub fn from_unixtime_function(
    args: &[FieldValue],
    _ctx: &FunctionContext,
) -> Result<FieldValue, SqlError> {
    let Some(seconds) = arg_i64("FROM_UNIXTIME", args, 0)? else {
        return Ok(FieldValue::Null);
    };

    let instant = seconds
        .checked_mul(MICROS_PER_SECOND)
        .and_then(|micros| micros.checked_sub(POSTGRES_EPOCH_OFFSET_MICROS))
        .and_then(from_host_micros);

    match instant {
        Some(ts) => Ok(FieldValue::Timestamp(ts)),
        None => {
            log::debug!("FROM_UNIXTIME: {} is outside the timestamp range", seconds);
            Ok(FieldValue::Null)
        }
    }
}

/// UNIX_TIMESTAMP([ts]): whole seconds since 1970-01-01 UTC, floored.
///
/// Without an argument the context clock is read.
pub fn unix_timestamp_function(
    args: &[FieldValue],
    ctx: &FunctionContext,
) -> Result<FieldValue, SqlError> {
    let ts = if args.is_empty() {
        ctx.now()
    } else {
        match arg_timestamp("UNIX_TIMESTAMP", args, 0)? {
            Some(ts) => ts,
            None => return Ok(FieldValue::Null),
        }
    };
    // chrono keeps the sub-second part non-negative, so this is a floor
    Ok(FieldValue::Integer(ts.timestamp()))
}

/// TIMESTAMPDIFF(unit, start, end) with the unit given as text
pub fn timestampdiff_function(
    args: &[FieldValue],
    ctx: &FunctionContext,
) -> Result<FieldValue, SqlError> {
    let Some(unit) = arg_text("TIMESTAMPDIFF", args, 0)? else {
        return Ok(FieldValue::Null);
    };
    let unit = TimeUnit::from_str(unit)?;
    timestampdiff_in(unit, args.get(1..).unwrap_or_default(), ctx)
}

/// Shared body of every TIMESTAMPDIFF entry point; `args` is `(start, end)`.
pub fn timestampdiff_in(
    unit: TimeUnit,
    args: &[FieldValue],
    ctx: &FunctionContext,
) -> SqlResult<FieldValue> {
    let (Some(start), Some(end)) = (
        arg_timestamp("TIMESTAMPDIFF", args, 0)?,
        arg_timestamp("TIMESTAMPDIFF", args, 1)?,
    ) else {
        return Ok(FieldValue::Null);
    };

    match timestamp_diff(unit, &start, &end, &ctx.config().session_time_zone) {
        Some(diff) => Ok(FieldValue::Integer(diff)),
        None => {
            log::debug!("TIMESTAMPDIFF: {} difference overflows", unit);
            Ok(FieldValue::Null)
        }
    }
}

const UNIT_DIFF_SIGNATURE: FunctionSignature = FunctionSignature::fixed(
    &[ParamKind::Timestamp, ParamKind::Timestamp],
    ReturnKind::Fixed(ValueKind::Integer),
)
.with_volatility(Volatility::Stable);

/// One `TIMESTAMPDIFF_<UNIT>` entry point plus its `TIMEDIFF_<UNIT>` alias
macro_rules! register_unit_diff {
    ($handler:ident, $unit:expr, $name:literal, $alias:literal, $plural:literal) => {
        fn $handler(args: &[FieldValue], ctx: &FunctionContext) -> Result<FieldValue, SqlError> {
            timestampdiff_in($unit, args, ctx)
        }

        register_sql_function!(
            name: $name,
            aliases: [$alias],
            category: FunctionCategory::DateTime,
            signature: UNIT_DIFF_SIGNATURE,
            description: concat!("Whole ", $plural, " from the first timestamp to the second"),
            handler: $handler
        );
    };
}

register_unit_diff!(
    timestampdiff_microsecond,
    TimeUnit::Microsecond,
    "TIMESTAMPDIFF_MICROSECOND",
    "TIMEDIFF_MICROSECOND",
    "microseconds"
);
register_unit_diff!(
    timestampdiff_second,
    TimeUnit::Second,
    "TIMESTAMPDIFF_SECOND",
    "TIMEDIFF_SECOND",
    "seconds"
);
register_unit_diff!(
    timestampdiff_minute,
    TimeUnit::Minute,
    "TIMESTAMPDIFF_MINUTE",
    "TIMEDIFF_MINUTE",
    "minutes"
);
register_unit_diff!(
    timestampdiff_hour,
    TimeUnit::Hour,
    "TIMESTAMPDIFF_HOUR",
    "TIMEDIFF_HOUR",
    "hours"
);
register_unit_diff!(
    timestampdiff_day,
    TimeUnit::Day,
    "TIMESTAMPDIFF_DAY",
    "TIMEDIFF_DAY",
    "days"
);
register_unit_diff!(
    timestampdiff_week,
    TimeUnit::Week,
    "TIMESTAMPDIFF_WEEK",
    "TIMEDIFF_WEEK",
    "weeks"
);
register_unit_diff!(
    timestampdiff_month,
    TimeUnit::Month,
    "TIMESTAMPDIFF_MONTH",
    "TIMEDIFF_MONTH",
    "calendar months"
);
register_unit_diff!(
    timestampdiff_year,
    TimeUnit::Year,
    "TIMESTAMPDIFF_YEAR",
    "TIMEDIFF_YEAR",
    "calendar years"
);

register_sql_function!(
    name: "TIMESTAMPDIFF",
    aliases: [],
    category: FunctionCategory::DateTime,
    signature: FunctionSignature::fixed(
        &[ParamKind::Text, ParamKind::Timestamp, ParamKind::Timestamp],
        ReturnKind::Fixed(ValueKind::Integer)
    )
    .with_volatility(Volatility::Stable),
    description: "Whole units (MICROSECOND..YEAR) from the first timestamp to the second",
    handler: timestampdiff_function
);

register_sql_function!(
    name: "FROM_UNIXTIME",
    aliases: [],
    category: FunctionCategory::DateTime,
    signature: FunctionSignature::fixed(
        &[ParamKind::Integer],
        ReturnKind::Fixed(ValueKind::Timestamp)
    ),
    description: "Timestamp for a count of seconds since 1970-01-01 UTC",
    handler: from_unixtime_function
);

register_sql_function!(
    name: "UNIX_TIMESTAMP",
    aliases: [],
    category: FunctionCategory::DateTime,
    signature: FunctionSignature::optional(
        &[ParamKind::Timestamp],
        0,
        ReturnKind::Fixed(ValueKind::Integer)
    )
    .with_volatility(Volatility::Volatile),
    description: "Seconds since 1970-01-01 UTC for a timestamp, or for now",
    handler: unix_timestamp_function
);
