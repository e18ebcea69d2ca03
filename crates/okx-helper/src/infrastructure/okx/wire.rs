//! OKX v5 request bodies and response items, plus their conversion into
//! domain types.

use okx_helper_core::{
    BalanceSnapshot, Candle, ExitPrices, MarketOrder, OrderBook, OrderResult, PriceLevel, Result,
    SizeUnit, TradingError,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Body of `POST /api/v5/trade/order` for a spot market order in cash mode
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderRequestBody<'a> {
    pub inst_id: &'a str,
    pub td_mode: &'static str,
    pub side: &'static str,
    pub ord_type: &'static str,
    pub sz: String,
    pub tgt_ccy: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attach_algo_ords: Vec<AttachedAlgoOrder>,
}

/// Order price that makes a triggered exit execute at market
const MARKET_EXIT_PRICE: &str = "-1";

/// Take-profit / stop-loss pair riding on an order (`attachAlgoOrds`)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AttachedAlgoOrder {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tp_trigger_px: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tp_ord_px: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sl_trigger_px: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sl_ord_px: Option<&'static str>,
}

impl AttachedAlgoOrder {
    fn from_exits(exits: &ExitPrices) -> Option<Self> {
        if exits.is_empty() {
            return None;
        }
        let price = |px: Decimal| px.normalize().to_string();
        Some(AttachedAlgoOrder {
            tp_trigger_px: exits.take_profit.map(price),
            tp_ord_px: exits.take_profit.map(|_| MARKET_EXIT_PRICE),
            sl_trigger_px: exits.stop_loss.map(price),
            sl_ord_px: exits.stop_loss.map(|_| MARKET_EXIT_PRICE),
        })
    }
}

impl<'a> From<&'a MarketOrder> for OrderRequestBody<'a> {
    fn from(order: &'a MarketOrder) -> Self {
        OrderRequestBody {
            inst_id: order.inst_id.as_str(),
            td_mode: "cash",
            side: order.side.as_str(),
            ord_type: "market",
            sz: order.size.to_wire(),
            tgt_ccy: match order.size_unit {
                SizeUnit::Base => "base_ccy",
                SizeUnit::Quote => "quote_ccy",
            },
            attach_algo_ords: AttachedAlgoOrder::from_exits(&order.exits)
                .into_iter()
                .collect(),
        }
    }
}

/// Per-order acknowledgement inside the order placement envelope
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct OrderAck {
    pub ord_id: String,
    pub cl_ord_id: String,
    pub s_code: String,
    pub s_msg: String,
}

impl OrderAck {
    /// A zero envelope code can still carry a rejected order
    pub fn into_order_result(self, raw_response: serde_json::Value) -> Result<OrderResult> {
        if !self.s_code.is_empty() && self.s_code != "0" {
            return Err(TradingError::exchange(self.s_code, self.s_msg));
        }
        Ok(OrderResult {
            order_id: self.ord_id,
            client_order_id: Some(self.cl_ord_id).filter(|id| !id.is_empty()),
            status_code: if self.s_code.is_empty() {
                "0".to_string()
            } else {
                self.s_code
            },
            message: self.s_msg,
            raw_response,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct BalanceData {
    pub details: Vec<BalanceDetail>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct BalanceDetail {
    pub ccy: String,
    pub avail_bal: String,
}

impl BalanceData {
    /// Available balances; an empty `availBal` counts as zero
    pub fn into_snapshot(self) -> Result<BalanceSnapshot> {
        let mut snapshot = BalanceSnapshot::new();
        for detail in self.details {
            let available = if detail.avail_bal.trim().is_empty() {
                Decimal::ZERO
            } else {
                parse_decimal("availBal", &detail.avail_bal)?
            };
            snapshot.insert(detail.ccy, available);
        }
        Ok(snapshot)
    }
}

/// Book levels arrive as `[price, size, deprecated, orderCount]`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct BookData {
    pub asks: Vec<Vec<String>>,
    pub bids: Vec<Vec<String>>,
    pub ts: String,
}

impl BookData {
    pub fn into_order_book(self) -> Result<OrderBook> {
        Ok(OrderBook {
            asks: self
                .asks
                .iter()
                .map(|row| price_level(row))
                .collect::<Result<_>>()?,
            bids: self
                .bids
                .iter()
                .map(|row| price_level(row))
                .collect::<Result<_>>()?,
            ts: parse_millis(&self.ts)?,
        })
    }
}

fn price_level(row: &[String]) -> Result<PriceLevel> {
    let (price, size) = match row {
        [price, size, ..] => (price, size),
        _ => {
            return Err(TradingError::Decode(format!(
                "Order book level has {} fields",
                row.len()
            )));
        }
    };
    Ok(PriceLevel {
        price: parse_decimal("price", price)?,
        size: parse_decimal("size", size)?,
        orders: row.get(3).and_then(|n| n.parse().ok()).unwrap_or(0),
    })
}

/// Candles arrive as `[ts, o, h, l, c, vol, volCcy, volCcyQuote, confirm]`
pub(crate) fn candle_from_row(row: &[String]) -> Result<Candle> {
    if row.len() < 7 {
        return Err(TradingError::Decode(format!(
            "Candle has {} fields",
            row.len()
        )));
    }
    Ok(Candle {
        ts: parse_millis(&row[0])?,
        open: parse_decimal("open", &row[1])?,
        high: parse_decimal("high", &row[2])?,
        low: parse_decimal("low", &row[3])?,
        close: parse_decimal("close", &row[4])?,
        volume: parse_decimal("vol", &row[5])?,
        volume_ccy: parse_decimal("volCcy", &row[6])?,
        confirmed: row.get(8).is_some_and(|c| c == "1"),
    })
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ServerTime {
    pub ts: String,
}

impl ServerTime {
    pub fn millis(&self) -> Result<i64> {
        parse_millis(&self.ts)
    }
}

fn parse_decimal(field: &str, value: &str) -> Result<Decimal> {
    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .map_err(|_| TradingError::Decode(format!("Invalid {} '{}'", field, value)))
}

fn parse_millis(value: &str) -> Result<i64> {
    value
        .parse()
        .map_err(|_| TradingError::Decode(format!("Invalid timestamp '{}'", value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use okx_helper_core::{InstId, PositiveAmount};
    use rust_decimal_macros::dec;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_buy_body_is_quote_sized() {
        let order = MarketOrder::buy_notional(
            InstId::default(),
            PositiveAmount::new(dec!(10.00)).unwrap(),
        );
        let body = serde_json::to_string(&OrderRequestBody::from(&order)).unwrap();
        assert_eq!(
            body,
            r#"{"instId":"BTC-USDT","tdMode":"cash","side":"buy","ordType":"market","sz":"10","tgtCcy":"quote_ccy"}"#
        );
    }

    #[test]
    fn test_buy_body_attaches_market_exits() {
        let order = MarketOrder::buy_notional(
            InstId::default(),
            PositiveAmount::new(dec!(10)).unwrap(),
        )
        .with_exits(ExitPrices {
            take_profit: Some(dec!(52500.0)),
            stop_loss: Some(dec!(49000)),
        });
        let body = serde_json::to_value(OrderRequestBody::from(&order)).unwrap();
        assert_eq!(
            body["attachAlgoOrds"],
            serde_json::json!([{
                "tpTriggerPx": "52500",
                "tpOrdPx": "-1",
                "slTriggerPx": "49000",
                "slOrdPx": "-1"
            }])
        );

        let take_profit_only = order.with_exits(ExitPrices {
            take_profit: Some(dec!(52500)),
            stop_loss: None,
        });
        let body = serde_json::to_value(OrderRequestBody::from(&take_profit_only)).unwrap();
        assert_eq!(
            body["attachAlgoOrds"],
            serde_json::json!([{"tpTriggerPx": "52500", "tpOrdPx": "-1"}])
        );
    }

    #[test]
    fn test_sell_body_is_base_sized() {
        let order = MarketOrder::sell_quantity(
            InstId::new("eth-usdt").unwrap(),
            PositiveAmount::new(dec!(0.25)).unwrap(),
        );
        let body = serde_json::to_value(OrderRequestBody::from(&order)).unwrap();
        assert_eq!(body["instId"], "ETH-USDT");
        assert_eq!(body["side"], "sell");
        assert_eq!(body["sz"], "0.25");
        assert_eq!(body["tgtCcy"], "base_ccy");
    }

    #[test]
    fn test_rejected_ack_is_exchange_error() {
        let ack = OrderAck {
            s_code: "51008".into(),
            s_msg: "Insufficient balance".into(),
            ..Default::default()
        };
        assert_eq!(
            ack.into_order_result(serde_json::Value::Null).unwrap_err(),
            TradingError::exchange("51008", "Insufficient balance")
        );
    }

    #[test]
    fn test_accepted_ack() {
        let ack: OrderAck = serde_json::from_str(
            r#"{"ordId":"312269865356374016","clOrdId":"","sCode":"0","sMsg":"","tag":""}"#,
        )
        .unwrap();
        let result = ack.into_order_result(serde_json::json!({"code":"0"})).unwrap();
        assert_eq!(result.order_id, "312269865356374016");
        assert_eq!(result.client_order_id, None);
        assert_eq!(result.status_code, "0");
        assert_eq!(result.raw_response["code"], "0");
    }

    #[test]
    fn test_balance_details() {
        let data: BalanceData = serde_json::from_str(
            r#"{"totalEq":"100","details":[{"ccy":"BTC","availBal":"0.0015"},{"ccy":"USDT","availBal":""},{"ccy":"ETH","availBal":"1e-8"}]}"#,
        )
        .unwrap();
        let snapshot = data.into_snapshot().unwrap();
        assert_eq!(snapshot.available("BTC"), dec!(0.0015));
        assert_eq!(snapshot.available("USDT"), dec!(0));
        assert_eq!(snapshot.available("ETH"), dec!(0.00000001));
    }

    #[test]
    fn test_book_levels() {
        let data: BookData = serde_json::from_str(
            r#"{"asks":[["41006.8","0.6","0","9"]],"bids":[["41006.3","0.3","0","2"]],"ts":"1629966436396"}"#,
        )
        .unwrap();
        let book = data.into_order_book().unwrap();
        assert_eq!(book.best_ask().unwrap().price, dec!(41006.8));
        assert_eq!(book.best_bid().unwrap().orders, 2);
        assert_eq!(book.spread(), Some(dec!(0.5)));
        assert_eq!(book.ts, 1629966436396);
    }

    #[test]
    fn test_candle_row() {
        let candle = candle_from_row(&strings(&[
            "1597026383085",
            "3.721",
            "3.743",
            "3.677",
            "3.708",
            "8422410",
            "22698348.04828491",
            "12698348.04828491",
            "0",
        ]))
        .unwrap();
        assert_eq!(candle.close, dec!(3.708));
        assert!(!candle.confirmed);

        assert!(matches!(
            candle_from_row(&strings(&["1", "2"])),
            Err(TradingError::Decode(_))
        ));
    }

    #[test]
    fn test_invalid_decimal_is_decode_error() {
        assert!(matches!(
            price_level(&strings(&["abc", "1"])),
            Err(TradingError::Decode(_))
        ));
    }
}
