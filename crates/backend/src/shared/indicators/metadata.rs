use contracts::shared::indicators::*;

/// Well-known indicator IDs (constants to avoid typos).
pub mod ids {
    use super::*;

    pub fn revenue() -> IndicatorId {
        IndicatorId::new("revenue")
    }
    pub fn gross_profit() -> IndicatorId {
        IndicatorId::new("gross_profit")
    }
    pub fn net_profit() -> IndicatorId {
        IndicatorId::new("net_profit")
    }
    pub fn net_margin() -> IndicatorId {
        IndicatorId::new("net_margin")
    }
    pub fn break_even() -> IndicatorId {
        IndicatorId::new("break_even")
    }
    pub fn coupons() -> IndicatorId {
        IndicatorId::new("coupons")
    }
    pub fn average_ticket() -> IndicatorId {
        IndicatorId::new("average_ticket")
    }
    pub fn active_skus() -> IndicatorId {
        IndicatorId::new("active_skus")
    }
}

pub const EXECUTIVE_SUMMARY_SET: &str = "executive_summary";

fn money() -> ValueFormat {
    ValueFormat::Money {
        currency: "R$".into(),
    }
}

/// Build the full catalogue of indicators + sets.
pub fn build_catalog() -> IndicatorCatalogResponse {
    let indicators = vec![
        IndicatorMeta {
            id: ids::revenue(),
            label: "Faturamento".into(),
            short_label: Some("Fat.".into()),
            icon: "dollar-sign".into(),
            format: money(),
            description: Some("Soma do faturamento das categorias no mês de referência".into()),
        },
        IndicatorMeta {
            id: ids::gross_profit(),
            label: "Lucro Bruto".into(),
            short_label: None,
            icon: "trending-up".into(),
            format: money(),
            description: Some("Faturamento menos custo das mercadorias".into()),
        },
        IndicatorMeta {
            id: ids::net_profit(),
            label: "Lucro Líquido".into(),
            short_label: None,
            icon: "wallet".into(),
            format: money(),
            description: Some("Lucro bruto menos o custo fixo mensal".into()),
        },
        IndicatorMeta {
            id: ids::net_margin(),
            label: "Margem Líquida".into(),
            short_label: Some("Margem".into()),
            icon: "percent".into(),
            format: ValueFormat::Percent { decimals: 1 },
            description: Some("Lucro líquido / faturamento".into()),
        },
        IndicatorMeta {
            id: ids::break_even(),
            label: "Ponto de Equilíbrio".into(),
            short_label: Some("Equilíbrio".into()),
            icon: "scale".into(),
            format: money(),
            description: Some("Faturamento que cobre o custo fixo na margem bruta atual".into()),
        },
        IndicatorMeta {
            id: ids::coupons(),
            label: "Cupons".into(),
            short_label: None,
            icon: "receipt".into(),
            format: ValueFormat::Integer,
            description: Some("Quantidade de documentos fiscais emitidos".into()),
        },
        IndicatorMeta {
            id: ids::average_ticket(),
            label: "Ticket Médio".into(),
            short_label: Some("Ticket".into()),
            icon: "shopping-cart".into(),
            format: money(),
            description: Some("Faturamento / cupons".into()),
        },
        IndicatorMeta {
            id: ids::active_skus(),
            label: "SKUs Ativos".into(),
            short_label: Some("SKUs".into()),
            icon: "package".into(),
            format: ValueFormat::Integer,
            description: Some("Produtos com venda no mês".into()),
        },
    ];

    let sets = vec![IndicatorSetMeta {
        id: IndicatorSetId::new(EXECUTIVE_SUMMARY_SET),
        label: "Resumo Executivo".into(),
        indicators: vec![
            ids::revenue(),
            ids::net_profit(),
            ids::net_margin(),
            ids::break_even(),
            ids::coupons(),
            ids::average_ticket(),
            ids::active_skus(),
            ids::gross_profit(),
        ],
        columns: 4,
    }];

    IndicatorCatalogResponse { indicators, sets }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_set_member_is_in_catalog() {
        let catalog = build_catalog();
        for set in &catalog.sets {
            for id in &set.indicators {
                assert!(catalog.indicators.iter().any(|m| &m.id == id), "{} missing", id.0);
            }
        }
    }
}
