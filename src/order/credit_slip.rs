//! Credit slips and vouchers produced by a successful refund.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::OrderId;
use crate::error::VerificationError;

/// A refund document issued against an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditSlip {
    /// Sequence number of the slip within its order, starting at 1.
    pub id: u64,
    /// The refunded order.
    pub order_id: OrderId,
    /// Total refunded on this slip (products and shipping).
    pub amount: Decimal,
    /// Shipping part of the refund.
    pub shipping_cost_amount: Decimal,
    /// Refunded product total, tax included.
    pub total_products_tax_incl: Decimal,
    /// Refunded shipping total, tax included.
    pub total_shipping_tax_incl: Decimal,
    /// Whether the slip came from a partial refund.
    pub partial: bool,
}

/// Numeric credit slip fields that can be read back by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreditSlipField {
    /// `amount`
    Amount,
    /// `shipping_cost_amount`
    ShippingCostAmount,
    /// `total_products_tax_incl`
    TotalProductsTaxIncl,
    /// `total_shipping_tax_incl`
    TotalShippingTaxIncl,
}

impl FromStr for CreditSlipField {
    type Err = VerificationError;

    fn from_str(field: &str) -> Result<Self, Self::Err> {
        match field {
            "amount" => Ok(Self::Amount),
            "shipping_cost_amount" => Ok(Self::ShippingCostAmount),
            "total_products_tax_incl" => Ok(Self::TotalProductsTaxIncl),
            "total_shipping_tax_incl" => Ok(Self::TotalShippingTaxIncl),
            other => Err(VerificationError::UnknownField {
                field: other.to_owned(),
            }),
        }
    }
}

impl CreditSlip {
    /// Returns the value of a numeric field.
    #[must_use]
    pub const fn field(&self, field: CreditSlipField) -> Decimal {
        match field {
            CreditSlipField::Amount => self.amount,
            CreditSlipField::ShippingCostAmount => self.shipping_cost_amount,
            CreditSlipField::TotalProductsTaxIncl => self.total_products_tax_incl,
            CreditSlipField::TotalShippingTaxIncl => self.total_shipping_tax_incl,
        }
    }
}

/// A voucher generated in place of, or alongside, a credit slip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voucher {
    /// The refunded order.
    pub order_id: OrderId,
    /// Voucher value.
    pub amount: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn slip() -> CreditSlip {
        CreditSlip {
            id: 1,
            order_id: OrderId::new(3),
            amount: Decimal::new(1500, 2),
            shipping_cost_amount: Decimal::new(500, 2),
            total_products_tax_incl: Decimal::new(1000, 2),
            total_shipping_tax_incl: Decimal::new(500, 2),
            partial: true,
        }
    }

    #[rstest]
    #[case("amount", Decimal::new(1500, 2))]
    #[case("shipping_cost_amount", Decimal::new(500, 2))]
    #[case("total_products_tax_incl", Decimal::new(1000, 2))]
    #[case("total_shipping_tax_incl", Decimal::new(500, 2))]
    fn fields_resolve_by_name(#[case] name: &str, #[case] expected: Decimal) {
        let field: CreditSlipField = name.parse().expect("field name should be known");
        assert_eq!(slip().field(field), expected);
    }

    #[rstest]
    fn unknown_field_is_rejected() {
        let error = "total_paid"
            .parse::<CreditSlipField>()
            .expect_err("unknown field should fail");
        assert_eq!(
            error,
            VerificationError::UnknownField {
                field: String::from("total_paid"),
            }
        );
    }
}
