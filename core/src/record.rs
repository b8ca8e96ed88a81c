//! The output row.

use crate::{
    calendar::format_timestamp,
    types::{CountryName, CurrencyCode, UserId},
};
use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};

/// Column order of the output file. The misspelled `subscribtion_date`
/// is the published column name and is kept as is.
pub const COLUMNS: [&str; 15] = [
    "user_id",
    "subscribtion_date",
    "activation_date",
    "expiration_date",
    "plan",
    "refund_date",
    "payment_method",
    "payment_provider",
    "currency",
    "paid_amount",
    "base_price",
    "discounted_amount",
    "promotion",
    "discount_percentage",
    "country",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubscriptionRecord {
    pub user_id: UserId,
    #[serde(rename = "subscribtion_date", serialize_with = "serialize_timestamp")]
    pub subscription_date: NaiveDateTime,
    #[serde(serialize_with = "serialize_timestamp")]
    pub activation_date: NaiveDateTime,
    #[serde(serialize_with = "serialize_timestamp")]
    pub expiration_date: NaiveDateTime,
    pub plan: String,
    /// Refunds are not modelled; always `None`.
    #[serde(serialize_with = "serialize_optional_timestamp")]
    pub refund_date: Option<NaiveDateTime>,
    pub payment_method: String,
    pub payment_provider: String,
    pub currency: CurrencyCode,
    pub paid_amount: f64,
    pub base_price: f64,
    pub discounted_amount: f64,
    #[serde(serialize_with = "serialize_optional_text")]
    pub promotion: Option<String>,
    pub discount_percentage: f64,
    pub country: CountryName,
}

fn serialize_timestamp<S: Serializer>(at: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&format_timestamp(at))
}

fn serialize_optional_timestamp<S: Serializer>(
    at: &Option<NaiveDateTime>,
    s: S,
) -> Result<S::Ok, S::Error> {
    match at {
        Some(at) => serialize_timestamp(at, s),
        None => s.serialize_str(""),
    }
}

fn serialize_optional_text<S: Serializer>(text: &Option<String>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(text.as_deref().unwrap_or(""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::midnight;

    fn sample() -> SubscriptionRecord {
        let start = midnight(2023, 5, 10);
        SubscriptionRecord {
            user_id: "U-100200".into(),
            subscription_date: start,
            activation_date: start,
            expiration_date: midnight(2023, 6, 9),
            plan: "Monthly".into(),
            refund_date: None,
            payment_method: "online_card".into(),
            payment_provider: "visa".into(),
            currency: "EGP".into(),
            paid_amount: 1200.0,
            base_price: 1200.0,
            discounted_amount: 0.0,
            promotion: None,
            discount_percentage: 0.0,
            country: "Egypt".into(),
        }
    }

    fn to_csv_line(record: &SubscriptionRecord) -> String {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());
        writer.serialize(record).unwrap();
        String::from_utf8(writer.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn absent_fields_render_empty() {
        let line = to_csv_line(&sample());
        assert_eq!(
            line,
            "U-100200,2023-05-10 00:00:00,2023-05-10 00:00:00,2023-06-09 00:00:00,\
             Monthly,,online_card,visa,EGP,1200.0,1200.0,0.0,,0.0,Egypt\n"
        );
    }

    #[test]
    fn promotion_code_is_written() {
        let mut record = sample();
        record.promotion = Some("DISCOUNT10".into());
        record.discount_percentage = 10.0;
        let line = to_csv_line(&record);
        assert!(line.contains(",DISCOUNT10,10.0,"), "{line}");
    }

    #[test]
    fn header_names_match_columns() {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.serialize(sample()).unwrap();
        let text = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        let header = text.lines().next().unwrap();
        assert_eq!(header, COLUMNS.join(","));
    }
}
