//! Tests for core domain types

#[cfg(test)]
mod tests {
    use super::super::types::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    #[test]
    fn test_scan_mode_from_str() {
        assert_eq!("24h".parse::<ScanMode>().unwrap(), ScanMode::Day);
        assert_eq!("day".parse::<ScanMode>().unwrap(), ScanMode::Day);
        assert_eq!("1h".parse::<ScanMode>().unwrap(), ScanMode::Hour);
        assert_eq!("hour".parse::<ScanMode>().unwrap(), ScanMode::Hour);
        assert_eq!(
            "incremental".parse::<ScanMode>().unwrap(),
            ScanMode::Incremental
        );
        assert_eq!("INCR".parse::<ScanMode>().unwrap(), ScanMode::Incremental);
        assert!("weekly".parse::<ScanMode>().is_err());
    }

    #[test]
    fn test_scan_mode_display_round_trip() {
        for mode in [ScanMode::Day, ScanMode::Hour, ScanMode::Incremental] {
            assert_eq!(mode.to_string().parse::<ScanMode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_scan_mode_serde_strings() {
        assert_eq!(serde_json::to_string(&ScanMode::Day).unwrap(), "\"24h\"");
        assert_eq!(serde_json::to_string(&ScanMode::Hour).unwrap(), "\"1h\"");
        assert_eq!(
            serde_json::from_str::<ScanMode>("\"incremental\"").unwrap(),
            ScanMode::Incremental
        );
    }

    #[test]
    fn test_scan_mode_labels() {
        assert_eq!(ScanMode::Day.label(), "24H");
        assert_eq!(ScanMode::Hour.label(), "1H");
        assert_eq!(ScanMode::Incremental.label(), "Window");
    }

    #[test]
    fn test_trade_action_display() {
        assert_eq!(TradeAction::Open.to_string(), "OPEN");
        assert_eq!(TradeAction::Increase.to_string(), "INCREASE");
        assert_eq!(TradeAction::Reduce.to_string(), "REDUCE");
        assert_eq!(TradeAction::Close.to_string(), "CLOSE");
    }

    #[test]
    fn test_position_side_display() {
        assert_eq!(PositionSide::Long.to_string(), "LONG");
        assert_eq!(PositionSide::Short.to_string(), "SHORT");
    }

    #[test]
    fn test_run_state_serde_round_trip() {
        let state = RunState {
            last_run_timestamp: 123,
            last_scan_type: ScanMode::Hour,
        };
        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("last_run_timestamp"));
        assert!(json.contains("\"1h\""));
        assert_eq!(serde_json::from_str::<RunState>(&json).unwrap(), state);
    }

    #[test]
    fn test_trade_time_utc() {
        let when = Utc.with_ymd_and_hms(2024, 5, 1, 9, 5, 0).unwrap();
        let trade = Trade {
            asset: "BTC".to_string(),
            action: TradeAction::Open,
            direction: "Open Long".to_string(),
            side: "B".to_string(),
            price: dec!(40000),
            size: dec!(1),
            value: dec!(40000),
            pnl: dec!(0),
            time: when.timestamp_millis(),
        };
        assert_eq!(trade.time_utc(), when);
    }
}
