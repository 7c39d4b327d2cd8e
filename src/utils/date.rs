use chrono::{DateTime, NaiveDateTime};

pub const DATE_FMT: &str = "%Y-%m-%dT%H:%M:%S%.f";

// accepts RFC 3339 (what we write) and the zone-less DATE_FMT
pub fn parse_date(str_time: &str) -> Option<NaiveDateTime> {
    if let Ok(date) = DateTime::parse_from_rfc3339(str_time) {
        return Some(date.naive_utc());
    }
    NaiveDateTime::parse_from_str(str_time, DATE_FMT).ok()
}

pub mod serializer {
    use chrono::{NaiveDateTime, TimeZone, Utc};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde::de::Error;
    use crate::utils::date::parse_date;

    pub fn serialize<S: Serializer>(time: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        time_to_json(*time).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let str_time: String = Deserialize::deserialize(deserializer)?;
        parse_date(&str_time).ok_or_else(|| D::Error::custom(format!("invalid date {}", str_time)))
    }

    pub(crate) fn time_to_json(t: NaiveDateTime) -> String {
        Utc.from_utc_datetime(&t).to_rfc3339()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use serde::{Deserialize, Serialize};
    use crate::utils::date::{parse_date, serializer};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Stamped {
        #[serde(with = "serializer")]
        at: NaiveDateTime,
    }

    fn sample() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2022, 9, 24).and_then(|d| d.and_hms_micro_opt(4, 40, 35, 726029))
            .expect("valid date")
    }

    #[tokio::test]
    async fn test_should_parse_both_formats() {
        assert_eq!(Some(sample()), parse_date("2022-09-24T04:40:35.726029"));
        assert_eq!(Some(sample()), parse_date("2022-09-24T04:40:35.726029+00:00"));
        assert_eq!(None, parse_date("yesterday"));
    }

    #[tokio::test]
    async fn test_should_read_back_serialized_date() {
        let stamped = Stamped { at: sample() };
        let json = serde_json::to_string(&stamped).expect("should serialize");
        assert!(json.contains("+00:00"));
        let loaded: Stamped = serde_json::from_str(&json).expect("should deserialize");
        assert_eq!(stamped, loaded);
    }
}
