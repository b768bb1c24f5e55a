use once_cell::sync::Lazy;

/// Simulated market price in FCFA. Stands in for a live price feed.
#[derive(Debug, Clone)]
pub struct MarketPrice {
    pub crop_name: &'static str,
    pub price_avg_fcfa: f64,
    pub unit: &'static str,
    pub trend: &'static str,
}

static MARKET_PRICES: Lazy<Vec<MarketPrice>> = Lazy::new(|| {
    vec![
        MarketPrice { crop_name: "Cacao", price_avg_fcfa: 1500.0, unit: "kg", trend: "monte" },
        MarketPrice { crop_name: "Café Robusta", price_avg_fcfa: 1100.0, unit: "kg", trend: "stable" },
        MarketPrice { crop_name: "Café Arabica", price_avg_fcfa: 2300.0, unit: "kg", trend: "monte" },
        MarketPrice { crop_name: "Maïs", price_avg_fcfa: 250.0, unit: "kg", trend: "stable" },
        MarketPrice { crop_name: "Riz", price_avg_fcfa: 450.0, unit: "kg", trend: "monte" },
        MarketPrice { crop_name: "Tomate", price_avg_fcfa: 800.0, unit: "panier", trend: "baisse" },
        MarketPrice { crop_name: "Plantain", price_avg_fcfa: 3500.0, unit: "régime", trend: "stable" },
        MarketPrice { crop_name: "Pomme de terre", price_avg_fcfa: 400.0, unit: "kg", trend: "stable" },
        MarketPrice { crop_name: "Oignon", price_avg_fcfa: 600.0, unit: "kg", trend: "monte" },
        MarketPrice { crop_name: "Huile de palme", price_avg_fcfa: 900.0, unit: "litre", trend: "stable" },
    ]
});

pub fn current_prices() -> &'static [MarketPrice] {
    &MARKET_PRICES
}

/// One bullet per price, ready to drop into a prompt.
pub fn format_for_prompt() -> String {
    MARKET_PRICES
        .iter()
        .map(|p| {
            format!(
                "- {}: {} FCFA/{} ({})",
                p.crop_name, p.price_avg_fcfa, p.unit, p.trend
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_formatting_lists_every_price() {
        let formatted = format_for_prompt();
        assert_eq!(formatted.lines().count(), current_prices().len());
        assert!(formatted.contains("1500 FCFA/kg"));
    }
}
