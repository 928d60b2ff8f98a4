// Timestamp codec between OffsetDateTime and INTEGER columns
// OffsetDateTime 与 INTEGER 列之间的时间戳编解码

use time::{Duration, OffsetDateTime, macros::datetime};

use crate::Result;

/// Unset timestamp, stored as 0 / 未设置的时间戳，存储为 0
pub const ZERO: OffsetDateTime = datetime!(0001-01-01 0:00 UTC);

/// Base of every generated `created` column / 所有生成的 created 列的基准时间
pub const BASE: OffsetDateTime = datetime!(2023-10-01 10:00 UTC);

const NANOS_PER_MILLI: i128 = 1_000_000;

/// Encode to unix milliseconds, `ZERO` becomes 0
/// 编码为 unix 毫秒，`ZERO` 编码为 0
pub fn bind_time(t: OffsetDateTime) -> i64 {
  if t == ZERO {
    return 0;
  }
  t.unix_timestamp_nanos().div_euclid(NANOS_PER_MILLI) as i64
}

/// Decode unix milliseconds, 0 becomes `ZERO`
/// 解码 unix 毫秒，0 解码为 `ZERO`
pub fn unbind_time(v: i64) -> Result<OffsetDateTime> {
  if v == 0 {
    return Ok(ZERO);
  }
  Ok(OffsetDateTime::from_unix_timestamp_nanos(
    v as i128 * NANOS_PER_MILLI,
  )?)
}

/// `BASE` plus `n` minutes / `BASE` 加 `n` 分钟
#[inline]
pub fn minutes(n: i64) -> OffsetDateTime {
  BASE + Duration::minutes(n)
}

/// `BASE` plus `n` seconds / `BASE` 加 `n` 秒
#[inline]
pub fn seconds(n: i64) -> OffsetDateTime {
  BASE + Duration::seconds(n)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_zero_sentinel() {
    assert_eq!(bind_time(ZERO), 0);
    assert_eq!(unbind_time(0).unwrap(), ZERO);
  }

  #[test]
  fn test_base_millis() {
    // 2023-10-01T10:00:00Z
    assert_eq!(bind_time(BASE), 1_696_154_400_000);
    assert_eq!(unbind_time(1_696_154_400_000).unwrap(), BASE);
  }

  #[test]
  fn test_truncates_sub_millis() {
    let t = BASE + Duration::microseconds(1_500);
    assert_eq!(bind_time(t), bind_time(BASE) + 1);
  }

  #[test]
  fn test_floors_before_epoch() {
    let t = datetime!(1969-12-31 23:59:59.9995 UTC);
    assert_eq!(bind_time(t), -1);
    assert_eq!(
      unbind_time(-1).unwrap(),
      datetime!(1969-12-31 23:59:59.999 UTC)
    );
    assert_eq!(bind_time(datetime!(1969-12-31 23:59:58.0001 UTC)), -2000);
  }

  #[test]
  fn test_out_of_range() {
    assert!(unbind_time(i64::MAX).is_err());
  }
}
