use crate::domain::order::Order;
use crate::error::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

/// Flat row projected from an `Order` for the final ledger report.
#[derive(Debug, Serialize)]
struct OrderRow<'a> {
    order: &'a str,
    customer: &'a str,
    status: String,
    weight_in_grams: u32,
    price: Decimal,
    feedback: String,
}

/// Writes the final order ledger as CSV.
pub struct OrderReportWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> OrderReportWriter<W> {
    pub fn new(destination: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(destination),
        }
    }

    /// Writes one row per order, sorted by order id for stable output.
    pub fn write_orders(&mut self, mut orders: Vec<Order>) -> Result<()> {
        orders.sort_by(|a, b| a.id.cmp(&b.id));
        for order in &orders {
            self.writer.serialize(OrderRow {
                order: &order.id,
                customer: &order.customer_id,
                status: order.status.to_string(),
                weight_in_grams: order.weight_in_grams,
                price: order.price.value(),
                feedback: order.feedback.to_string(),
            })?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
