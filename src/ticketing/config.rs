use crate::shared::DateOrder;

pub struct Config {
    pub card_column: String,
    pub timestamp_column: String,
    pub line_column: String,
    pub latitude_column: String,
    pub longitude_column: String,
    pub delimiter: u8,
    pub date_order: DateOrder,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            card_column: "NUMEROCARTAO".into(),
            timestamp_column: "DATA".into(),
            line_column: "CODLINHA".into(),
            latitude_column: "LATITUDE".into(),
            longitude_column: "LONGITUDE".into(),
            delimiter: b',',
            date_order: DateOrder::DayFirst,
        }
    }
}
