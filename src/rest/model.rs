//! Strictly typed response models.
//!
//! Only the fields callers rely on are modeled. Missing required fields fail decoding; fields the
//! exchange adds later are ignored. Prices, sizes, and balances stay as the decimal strings the
//! API sends.

// self
use crate::_prelude::*;

/// `GET /time` response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerTime {
	/// ISO-8601 server time.
	pub iso: String,
	/// Unix seconds, as a string.
	pub epoch_seconds: String,
	/// Unix milliseconds, as a string.
	pub epoch_millis: String,
}

/// Amount of a currency.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
	/// Decimal amount.
	pub value: String,
	/// Currency code.
	pub currency: String,
}

/// One brokerage account (wallet).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
	/// Account identifier.
	pub uuid: String,
	/// Display name.
	pub name: String,
	/// Currency held by the account.
	pub currency: String,
	/// Spendable balance.
	pub available_balance: Balance,
	/// Amount on hold.
	#[serde(default)]
	pub hold: Option<Balance>,
	/// Whether this is the default account for its currency.
	#[serde(default)]
	pub default: bool,
	/// Whether the account is active.
	#[serde(default)]
	pub active: bool,
	/// Whether the account is ready for trading.
	#[serde(default)]
	pub ready: bool,
	/// Account type, e.g. `ACCOUNT_TYPE_CRYPTO`.
	#[serde(default, rename = "type")]
	pub kind: Option<String>,
}

/// `GET /accounts` response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountList {
	/// Accounts on this page.
	pub accounts: Vec<Account>,
	/// Whether another page exists.
	#[serde(default)]
	pub has_next: bool,
	/// Cursor for the next page.
	#[serde(default)]
	pub cursor: String,
	/// Number of accounts on this page.
	#[serde(default)]
	pub size: u32,
}

/// One tradable product.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
	/// Product identifier, e.g. `BTC-USD`.
	pub product_id: String,
	/// Last price.
	#[serde(default)]
	pub price: String,
	/// Base currency.
	#[serde(default)]
	pub base_currency_id: String,
	/// Quote currency.
	#[serde(default)]
	pub quote_currency_id: String,
	/// Listing status.
	#[serde(default)]
	pub status: String,
	/// Whether trading is halted.
	#[serde(default)]
	pub trading_disabled: bool,
}

/// `GET /products` response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductList {
	/// Products returned.
	pub products: Vec<Product>,
	/// Total number of products.
	#[serde(default)]
	pub num_products: u32,
}

/// One price level of an order book.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookLevel {
	/// Price.
	pub price: String,
	/// Aggregate size at this price.
	pub size: String,
}

/// Order book snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBook {
	/// Product identifier.
	pub product_id: String,
	/// Bids, best first.
	pub bids: Vec<BookLevel>,
	/// Asks, best first.
	pub asks: Vec<BookLevel>,
	/// Snapshot time.
	#[serde(default)]
	pub time: Option<String>,
}

/// `GET /products/{id}/book` response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductBookResponse {
	/// The book snapshot.
	pub pricebook: PriceBook,
}

/// One OHLCV candle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candle {
	/// Bucket start, Unix seconds as a string.
	pub start: String,
	/// Lowest price.
	pub low: String,
	/// Highest price.
	pub high: String,
	/// Opening price.
	pub open: String,
	/// Closing price.
	pub close: String,
	/// Traded volume.
	pub volume: String,
}

/// `GET /products/{id}/candles` response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandleList {
	/// Candles, newest first.
	pub candles: Vec<Candle>,
}

/// Candle bucket sizes accepted by the candles endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Granularity {
	/// One minute.
	OneMinute,
	/// Five minutes.
	FiveMinute,
	/// Fifteen minutes.
	FifteenMinute,
	/// Thirty minutes.
	ThirtyMinute,
	/// One hour.
	OneHour,
	/// Two hours.
	TwoHour,
	/// Six hours.
	SixHour,
	/// One day.
	OneDay,
}
impl Granularity {
	/// Returns the wire label.
	pub const fn as_str(self) -> &'static str {
		match self {
			Granularity::OneMinute => "ONE_MINUTE",
			Granularity::FiveMinute => "FIVE_MINUTE",
			Granularity::FifteenMinute => "FIFTEEN_MINUTE",
			Granularity::ThirtyMinute => "THIRTY_MINUTE",
			Granularity::OneHour => "ONE_HOUR",
			Granularity::TwoHour => "TWO_HOUR",
			Granularity::SixHour => "SIX_HOUR",
			Granularity::OneDay => "ONE_DAY",
		}
	}
}
impl Display for Granularity {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn accounts_ignore_unknown_fields() {
		let body = r#"{
			"accounts": [{
				"uuid": "8bfc20d7-f7c6-4422-bf07-8243ca4169fe",
				"name": "BTC Wallet",
				"currency": "BTC",
				"available_balance": {"value": "1.23", "currency": "BTC"},
				"default": true,
				"active": true,
				"created_at": "2021-05-31T09:59:59Z",
				"type": "ACCOUNT_TYPE_CRYPTO",
				"ready": true,
				"hold": {"value": "0", "currency": "BTC"},
				"retail_portfolio_id": "b87a2d3f"
			}],
			"has_next": false,
			"cursor": "",
			"size": 1
		}"#;
		let list: AccountList = serde_json::from_str(body).expect("Account list should decode.");

		assert_eq!(list.size, 1);
		assert_eq!(list.accounts[0].available_balance.value, "1.23");
		assert_eq!(list.accounts[0].kind.as_deref(), Some("ACCOUNT_TYPE_CRYPTO"));
	}

	#[test]
	fn missing_required_fields_fail() {
		let body = r#"{"accounts": [{"uuid": "x", "name": "n", "currency": "BTC"}]}"#;

		assert!(serde_json::from_str::<AccountList>(body).is_err());
	}

	#[test]
	fn server_time_uses_camel_case() {
		let time: ServerTime = serde_json::from_str(
			r#"{"iso":"2026-01-01T00:00:00Z","epochSeconds":"1767225600","epochMillis":"1767225600000"}"#,
		)
		.expect("Server time should decode.");

		assert_eq!(time.epoch_seconds, "1767225600");
	}

	#[test]
	fn granularity_labels_match_serde() {
		assert_eq!(
			serde_json::to_string(&Granularity::FifteenMinute).expect("Granularity should serialize."),
			format!("\"{}\"", Granularity::FifteenMinute)
		);
	}
}
