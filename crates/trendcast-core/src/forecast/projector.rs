use serde::{Deserialize, Serialize};

use super::trend::FittedModel;
use crate::TradingDate;

/// Model output for one calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub date: TradingDate,
    pub close: f64,
    pub high: f64,
}

/// Evaluate `model` at each date, preserving order and length.
///
/// No bound is placed on how far ahead a date may be; the lines simply
/// extend.
pub fn project(model: &FittedModel, dates: &[TradingDate]) -> Vec<Projection> {
    dates
        .iter()
        .map(|&date| {
            let axis = date.axis_value();
            Projection {
                date,
                close: model.predict_close(axis),
                high: model.predict_high(axis),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Bar, BarSeries, Symbol};

    #[test]
    fn projects_in_input_order() {
        let symbol = Symbol::parse("NMDC.NS").expect("valid");
        let bars = (1..=5)
            .map(|day| {
                let date = TradingDate::from_calendar(2024, 1, day).expect("valid");
                let close = 10.0 + f64::from(day);
                Bar::new(date, close, close + 2.0, close - 1.0, close, None).expect("valid")
            })
            .collect();
        let series = BarSeries::new(symbol, bars).expect("ordered");
        let model = FittedModel::fit(&series).expect("fit");

        let dates = [
            TradingDate::parse("2024-01-09").expect("valid"),
            TradingDate::parse("2024-01-07").expect("valid"),
        ];
        let projections = project(&model, &dates);

        assert_eq!(projections.len(), 2);
        assert_eq!(projections[0].date, dates[0]);
        assert!((projections[0].close - 19.0).abs() < 1e-9);
        assert!((projections[0].high - 21.0).abs() < 1e-9);
        assert!((projections[1].close - 17.0).abs() < 1e-9);
    }

    #[test]
    fn empty_date_list_projects_nothing() {
        let symbol = Symbol::parse("IOB.NS").expect("valid");
        let bars = vec![
            Bar::new(TradingDate::parse("2024-01-01").expect("valid"), 1.0, 2.0, 1.0, 1.0, None)
                .expect("valid"),
            Bar::new(TradingDate::parse("2024-01-02").expect("valid"), 2.0, 3.0, 2.0, 2.0, None)
                .expect("valid"),
        ];
        let model = FittedModel::fit(&BarSeries::new(symbol, bars).expect("ordered")).expect("fit");
        assert!(project(&model, &[]).is_empty());
    }
}
