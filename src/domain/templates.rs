//! Python source templates written by `strategy new`.

/// Package the scaffolder writes into when `--package` is not given.
pub const DEFAULT_PACKAGE: &str = "strategy_pack";

/// Entry-point group the trading engine discovers strategies under.
pub const ENTRYPOINT_GROUP: &str = "trading_system.strategies";

pub fn strategy_template(class_name: &str) -> String {
    format!(
        r#"from __future__ import annotations

from typing import Any, Dict

from trading_sdk.base_strategy import BaseStrategy
from trading_sdk.structs import AccountSnapshot, OrderSignal


class {class_name}(BaseStrategy):
    def default_params(self) -> Dict[str, Any]:
        return {{"risk_pct": 0.01, "min_qty": 0.0}}

    def next_signal(self, market_data: Any, account_data: Any) -> OrderSignal:
        if market_data is None or "Close" not in market_data.columns:
            return OrderSignal(
                action="WAIT",
                quantity=0.0,
                reasoning="insufficient data",
            )
        if len(market_data) < 2:
            return OrderSignal(
                action="WAIT",
                quantity=0.0,
                reasoning="insufficient data",
            )

        close = market_data["Close"]
        prev_price = float(close.iloc[-2])
        curr_price = float(close.iloc[-1])
        if curr_price <= 0:
            return OrderSignal(action="WAIT", quantity=0.0, reasoning="invalid price")

        snapshot = AccountSnapshot.from_account_data(account_data)
        balance = snapshot.cash if snapshot.cash > 0 else snapshot.balance
        risk_pct = float(self.params.get("risk_pct", 0.0))
        if balance <= 0 or risk_pct <= 0:
            return OrderSignal(
                action="WAIT",
                quantity=0.0,
                reasoning="invalid account or params",
            )

        quantity = (balance * risk_pct) / curr_price
        min_qty = float(self.params.get("min_qty", 0.0))
        if quantity <= min_qty:
            return OrderSignal(
                action="WAIT",
                quantity=0.0,
                reasoning="quantity below minimum",
            )

        action = "BUY" if curr_price > prev_price else "SELL"
        reason = "price up" if action == "BUY" else "price down"
        return OrderSignal(
            action=action,
            quantity=quantity,
            type="MARKET",
            reasoning=reason,
        )
"#
    )
}

pub fn strategy_test_template(package: &str, module_name: &str, class_name: &str) -> String {
    format!(
        r#"from __future__ import annotations

import pandas as pd

from {package}.strategies.{module_name} import {class_name}


def test_strategy_returns_order_signal() -> None:
    strategy = {class_name}(params={{"risk_pct": 0.01}})
    strategy.setup({{"backtest": {{"fee_rate": 0.001}}}})
    market = pd.DataFrame({{"Close": [100.0, 101.0]}})
    signal = strategy.next_signal(
        market,
        {{"balance": 1000.0, "cash": 1000.0}},
    )
    assert signal.action in {{"BUY", "SELL", "WAIT"}}
"#
    )
}

/// The `pyproject.toml` lines that register a strategy with the engine.
pub fn entrypoint_hint(package: &str, module_name: &str, class_name: &str) -> String {
    format!(
        "[project.entry-points.\"{ENTRYPOINT_GROUP}\"]\n{module_name} = \"{package}.strategies.{module_name}:{class_name}\""
    )
}
