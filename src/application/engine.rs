use crate::application::context::CallContext;
use crate::domain::account::{Admin, Customer, CustomerProfile};
use crate::domain::order::{
    MINIMUM_ORDER_PRICE, Order, OrderStatus, TransitionEffect, minimum_price_for_weight,
};
use crate::domain::ports::{AdminStoreBox, CustomerStoreBox, OrderStoreBox, TreasuryBox};
use crate::domain::validation;
use crate::domain::AccountId;
use crate::error::{LedgerError, Result};
use tracing::info;

/// Static project description served to anyone who asks.
pub const ABOUT_PROJECT: &str =
    "Washkart is a laundry pickup and delivery service. Orders are prepaid \
     into escrow and the deposit is released to the operator on delivery or \
     refunded to the customer on cancellation.";

/// The main entry point of the order/account ledger.
///
/// `LedgerEngine` owns the storage backends and the transfer capability and
/// runs every public operation to completion before the next one is
/// observed: validation first, then the monetary transfer, then persistence,
/// so a failed transfer never leaves a stale status behind.
pub struct LedgerEngine {
    /// The ledger's own owning identity. Escrowed deposits are held here and
    /// only this account may register admins.
    owner: AccountId,
    admins: AdminStoreBox,
    customers: CustomerStoreBox,
    orders: OrderStoreBox,
    treasury: TreasuryBox,
}

impl LedgerEngine {
    pub fn new(
        owner: impl Into<AccountId>,
        admins: AdminStoreBox,
        customers: CustomerStoreBox,
        orders: OrderStoreBox,
        treasury: TreasuryBox,
    ) -> Self {
        Self {
            owner: owner.into(),
            admins,
            customers,
            orders,
            treasury,
        }
    }

    pub fn about_project(&self) -> &'static str {
        ABOUT_PROJECT
    }

    /// Registers an operator account. Callable only by the ledger's own
    /// owning identity.
    pub async fn register_admin(&self, ctx: &CallContext, admin_id: &str) -> Result<()> {
        if ctx.caller != self.owner {
            return Err(LedgerError::Authorization(
                "only the ledger owner can register admins".to_string(),
            ));
        }

        validation::longer_than("account id", admin_id, validation::ACCOUNT_ID_MIN_LEN)
            .map_err(LedgerError::Validation)?;

        if self.admins.contains(admin_id).await? {
            return Err(LedgerError::Conflict(format!(
                "admin {admin_id} already exists"
            )));
        }
        // An account never holds both roles.
        if self.customers.contains(admin_id).await? {
            return Err(LedgerError::Conflict(format!(
                "account {admin_id} is already registered as a customer"
            )));
        }

        self.admins
            .store(Admin::new(admin_id.to_string(), ctx.now))
            .await?;

        info!(admin_id, "admin registered");
        Ok(())
    }

    /// Creates a customer record for the caller, with an empty order history.
    pub async fn register_customer(&self, ctx: &CallContext, profile: CustomerProfile) -> Result<()> {
        Self::validate_profile(&ctx.caller, &profile)?;

        if self.customers.contains(&ctx.caller).await? {
            return Err(LedgerError::Conflict(format!(
                "customer {} already exists",
                ctx.caller
            )));
        }
        if self.admins.contains(&ctx.caller).await? {
            return Err(LedgerError::Conflict(format!(
                "account {} is already registered as an admin",
                ctx.caller
            )));
        }

        self.customers
            .store(Customer::new(ctx.caller.clone(), profile, ctx.now))
            .await?;

        info!(customer_id = %ctx.caller, "customer registered");
        Ok(())
    }

    /// Updates the caller's own profile. Same field rules as registration.
    pub async fn update_customer(&self, ctx: &CallContext, profile: CustomerProfile) -> Result<()> {
        Self::validate_profile(&ctx.caller, &profile)?;

        let mut customer = self
            .customers
            .get(&ctx.caller)
            .await?
            .ok_or_else(|| LedgerError::NotFound(format!("customer {}", ctx.caller)))?;

        // Unreachable given the lookup key, kept as defense-in-depth.
        if customer.id != ctx.caller {
            return Err(LedgerError::Authorization(
                "only the customer can update their own details".to_string(),
            ));
        }

        customer.apply_profile(profile, ctx.now);
        self.customers.store(customer).await?;

        info!(customer_id = %ctx.caller, "customer updated");
        Ok(())
    }

    /// Returns a customer record. Admins may view anyone; a customer only
    /// themselves.
    pub async fn get_customer(&self, ctx: &CallContext, account_id: &str) -> Result<Customer> {
        validation::longer_than("account id", account_id, validation::ACCOUNT_ID_MIN_LEN)
            .map_err(LedgerError::Validation)?;

        self.ensure_admin_or_subject(ctx, account_id, "details of this customer")
            .await?;

        self.customers
            .get(account_id)
            .await?
            .ok_or_else(|| LedgerError::NotFound(format!("customer {account_id}")))
    }

    pub async fn list_customers(&self, ctx: &CallContext) -> Result<Vec<Customer>> {
        if !self.admins.contains(&ctx.caller).await? {
            return Err(LedgerError::Authorization(
                "only admins can list customers".to_string(),
            ));
        }
        self.customers.get_all().await
    }

    /// Account ids of every registered admin. Open to any caller.
    pub async fn list_admins(&self) -> Result<Vec<AccountId>> {
        self.admins.ids().await
    }

    /// Places a wash order against the deposit attached to the call.
    ///
    /// The full attached value becomes the order price and is escrowed to
    /// the ledger's holding account until delivery or cancellation.
    pub async fn create_order(
        &self,
        ctx: &CallContext,
        id: &str,
        description: &str,
        weight_in_grams: u32,
    ) -> Result<()> {
        if self.admins.contains(&ctx.caller).await? {
            return Err(LedgerError::Authorization(
                "admins cannot place orders".to_string(),
            ));
        }

        let attached = ctx.attached.ok_or_else(|| {
            LedgerError::Validation("an attached deposit is required to place an order".to_string())
        })?;

        validation::at_least("attached deposit", attached.value(), MINIMUM_ORDER_PRICE)
            .map_err(LedgerError::Validation)?;
        validation::weight_within_bounds(weight_in_grams).map_err(LedgerError::Validation)?;
        validation::at_least(
            &format!("attached deposit for a {weight_in_grams} g order"),
            attached.value(),
            minimum_price_for_weight(weight_in_grams),
        )
        .map_err(LedgerError::Validation)?;
        validation::longer_than("account id", &ctx.caller, validation::ACCOUNT_ID_MIN_LEN)
            .map_err(LedgerError::Validation)?;

        let mut customer = self
            .customers
            .get(&ctx.caller)
            .await?
            .ok_or_else(|| LedgerError::NotFound(format!("customer {}", ctx.caller)))?;

        validation::longer_than("order id", id, validation::ORDER_ID_MIN_LEN)
            .map_err(LedgerError::Validation)?;
        if self.orders.contains(id).await? {
            return Err(LedgerError::Conflict(format!("order {id} already exists")));
        }

        // Escrow before any record is mutated: a failed transfer must leave
        // nothing behind.
        self.treasury.transfer(&self.owner, attached).await?;

        let order = Order::new(
            id.to_string(),
            ctx.caller.clone(),
            description.to_string(),
            weight_in_grams,
            attached,
            ctx.now,
        );
        self.orders.store(order).await?;

        customer.record_order(id.to_string(), ctx.now);
        self.customers.store(customer).await?;

        info!(
            order_id = %id,
            customer_id = %ctx.caller,
            amount = %attached,
            "order created, deposit escrowed"
        );
        Ok(())
    }

    /// Moves an order along the lifecycle state machine. Admin only.
    ///
    /// The transition table decides whether funds move; the transfer runs
    /// before the new status is persisted, as one atomic step of this call.
    pub async fn update_order_status(
        &self,
        ctx: &CallContext,
        order_id: &str,
        requested: OrderStatus,
    ) -> Result<()> {
        validation::longer_than("account id", &ctx.caller, validation::ACCOUNT_ID_MIN_LEN)
            .map_err(LedgerError::Validation)?;
        if !self.admins.contains(&ctx.caller).await? {
            return Err(LedgerError::Authorization(
                "only admins can update order status".to_string(),
            ));
        }

        validation::longer_than("order id", order_id, validation::ORDER_ID_MIN_LEN)
            .map_err(LedgerError::Validation)?;
        let mut order = self
            .orders
            .get(order_id)
            .await?
            .ok_or_else(|| LedgerError::NotFound(format!("order {order_id}")))?;

        match order.plan_transition(requested)? {
            TransitionEffect::None => {}
            TransitionEffect::PayOperator => {
                self.treasury.transfer(&ctx.caller, order.price).await?;
                info!(
                    order_id,
                    admin_id = %ctx.caller,
                    amount = %order.price,
                    "released escrowed price to operator"
                );
            }
            TransitionEffect::RefundCustomer => {
                self.treasury
                    .transfer(&order.customer_id, order.price)
                    .await?;
                info!(
                    order_id,
                    customer_id = %order.customer_id,
                    amount = %order.price,
                    "refunded escrowed price to customer"
                );
            }
        }

        order.apply_transition(requested, ctx.now);
        self.orders.store(order).await?;

        info!(order_id, status = %requested, "order status updated");
        Ok(())
    }

    /// Records the owning customer's rating for a delivered order.
    /// Resubmission replaces the previous rating; no history is kept.
    pub async fn submit_feedback(
        &self,
        ctx: &CallContext,
        order_id: &str,
        rating_code: u8,
        comment: &str,
    ) -> Result<()> {
        validation::longer_than("account id", &ctx.caller, validation::ACCOUNT_ID_MIN_LEN)
            .map_err(LedgerError::Validation)?;
        if !self.customers.contains(&ctx.caller).await? {
            return Err(LedgerError::NotFound(format!("customer {}", ctx.caller)));
        }

        validation::longer_than("order id", order_id, validation::ORDER_ID_MIN_LEN)
            .map_err(LedgerError::Validation)?;
        let mut order = self
            .orders
            .get(order_id)
            .await?
            .ok_or_else(|| LedgerError::NotFound(format!("order {order_id}")))?;

        if order.status != OrderStatus::Delivered {
            return Err(LedgerError::Conflict(format!(
                "order {order_id} must be delivered before feedback can be submitted"
            )));
        }
        if order.customer_id != ctx.caller {
            return Err(LedgerError::Authorization(
                "only the owning customer can submit feedback for this order".to_string(),
            ));
        }

        let rating = validation::feedback_rating(rating_code).map_err(LedgerError::Validation)?;
        order.record_feedback(rating, comment.to_string());
        self.orders.store(order).await?;

        info!(order_id, customer_id = %ctx.caller, rating = %rating, "feedback recorded");
        Ok(())
    }

    /// Returns an order. Admins may view any; a customer only their own.
    pub async fn get_order(&self, ctx: &CallContext, order_id: &str) -> Result<Order> {
        validation::longer_than("order id", order_id, validation::ORDER_ID_MIN_LEN)
            .map_err(LedgerError::Validation)?;

        let order = self
            .orders
            .get(order_id)
            .await?
            .ok_or_else(|| LedgerError::NotFound(format!("order {order_id}")))?;

        self.ensure_admin_or_subject(ctx, &order.customer_id, "details of this order")
            .await?;

        Ok(order)
    }

    pub async fn list_orders(&self, ctx: &CallContext) -> Result<Vec<Order>> {
        if !self.admins.contains(&ctx.caller).await? {
            return Err(LedgerError::Authorization(
                "only admins can list orders".to_string(),
            ));
        }
        self.orders.get_all().await
    }

    /// Orders placed by the given customer, resolved through the customer's
    /// append-only history. Ids with no stored order are skipped.
    pub async fn list_orders_for_customer(
        &self,
        ctx: &CallContext,
        customer_id: &str,
    ) -> Result<Vec<Order>> {
        validation::longer_than("account id", customer_id, validation::ACCOUNT_ID_MIN_LEN)
            .map_err(LedgerError::Validation)?;

        self.ensure_admin_or_subject(ctx, customer_id, "orders of this customer")
            .await?;

        let customer = self
            .customers
            .get(customer_id)
            .await?
            .ok_or_else(|| LedgerError::NotFound(format!("customer {customer_id}")))?;

        let mut orders = Vec::with_capacity(customer.order_ids.len());
        for order_id in &customer.order_ids {
            if let Some(order) = self.orders.get(order_id).await? {
                orders.push(order);
            }
        }
        Ok(orders)
    }

    /// Consumes the engine and returns the final state of all orders,
    /// bypassing caller authorization. Used by the replay binary to report
    /// after the journal is drained; never exposed through the transport.
    pub async fn into_report(self) -> Result<Vec<Order>> {
        self.orders.get_all().await
    }

    fn validate_profile(caller: &str, profile: &CustomerProfile) -> Result<()> {
        validation::longer_than("account id", caller, validation::ACCOUNT_ID_MIN_LEN)
            .map_err(LedgerError::Validation)?;
        validation::longer_than("customer name", &profile.name, validation::NAME_MIN_LEN)
            .map_err(LedgerError::Validation)?;
        validation::longer_than(
            "customer address",
            &profile.full_address,
            validation::ADDRESS_MIN_LEN,
        )
        .map_err(LedgerError::Validation)?;
        validation::longer_than("customer phone", &profile.phone, validation::PHONE_MIN_LEN)
            .map_err(LedgerError::Validation)?;
        Ok(())
    }

    async fn ensure_admin_or_subject(
        &self,
        ctx: &CallContext,
        subject: &str,
        what: &str,
    ) -> Result<()> {
        let is_self = ctx.caller == subject;
        let is_admin = self.admins.contains(&ctx.caller).await?;
        if is_admin || is_self {
            Ok(())
        } else {
            Err(LedgerError::Authorization(format!(
                "you are not authorized to view {what}"
            )))
        }
    }
}
