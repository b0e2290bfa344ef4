//! Status lifecycle manager
//!
//! Staff-driven status changes for reservations, inquiry orders and cart
//! orders, plus message read flags. Every change is a single overwrite; the
//! last writer wins. When a transition table is restricted the current status
//! is read first and the move checked against it.

use std::sync::Arc;

use shared::error::AppError;
use shared::models::{
    CartOrder, CartOrderStatus, InquiryOrder, InquiryStatus, Message, Reservation,
    ReservationStatus,
};
use thiserror::Error;

use super::{AuthContext, Capability, InvalidTransition, TransitionTable};
use crate::security_log;
use crate::store::{Store, StoreError};

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("role '{role}' lacks capability '{capability}'")]
    Forbidden {
        role: &'static str,
        capability: &'static str,
    },

    #[error(transparent)]
    InvalidTransition(#[from] InvalidTransition),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<LifecycleError> for AppError {
    fn from(err: LifecycleError) -> Self {
        match err {
            LifecycleError::Forbidden { role, capability } => AppError::forbidden(format!(
                "Role '{}' is not allowed to {}",
                role,
                capability.replace('_', " ")
            ))
            .with_detail("capability", capability),
            LifecycleError::InvalidTransition(e) => e.into(),
            LifecycleError::Store(e) => e.into(),
        }
    }
}

pub type LifecycleResult<T> = Result<T, LifecycleError>;

/// Applies staff status changes
#[derive(Clone)]
pub struct LifecycleManager {
    store: Arc<dyn Store>,
    reservations: TransitionTable<ReservationStatus>,
    inquiries: TransitionTable<InquiryStatus>,
    cart_orders: TransitionTable<CartOrderStatus>,
}

impl LifecycleManager {
    /// Manager with permissive tables for every entity
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            reservations: TransitionTable::permissive(),
            inquiries: TransitionTable::permissive(),
            cart_orders: TransitionTable::permissive(),
        }
    }

    pub fn with_reservation_table(mut self, table: TransitionTable<ReservationStatus>) -> Self {
        self.reservations = table;
        self
    }

    pub fn with_inquiry_table(mut self, table: TransitionTable<InquiryStatus>) -> Self {
        self.inquiries = table;
        self
    }

    pub fn with_cart_order_table(mut self, table: TransitionTable<CartOrderStatus>) -> Self {
        self.cart_orders = table;
        self
    }

    fn authorize(ctx: &AuthContext, capability: Capability) -> LifecycleResult<()> {
        if ctx.can(capability) {
            return Ok(());
        }
        security_log!(
            WARN,
            "capability_denied",
            user_id = %ctx.user_id,
            role = ctx.role.as_str(),
            capability = capability.as_str()
        );
        Err(LifecycleError::Forbidden {
            role: ctx.role.as_str(),
            capability: capability.as_str(),
        })
    }

    /// Confirming does not re-check capacity
    pub async fn set_reservation_status(
        &self,
        ctx: &AuthContext,
        id: i64,
        status: ReservationStatus,
    ) -> LifecycleResult<Reservation> {
        Self::authorize(ctx, Capability::ManageBookings)?;

        if !self.reservations.is_permissive() {
            let current = self
                .store
                .get_reservation(id)
                .await?
                .ok_or_else(|| StoreError::not_found("reservation", id))?;
            self.reservations.check(current.status, status)?;
        }

        let updated = self.store.update_reservation_status(id, status).await?;
        tracing::info!(
            reservation_id = id,
            status = %status,
            user_id = %ctx.user_id,
            "Reservation status updated"
        );
        Ok(updated)
    }

    pub async fn set_inquiry_status(
        &self,
        ctx: &AuthContext,
        id: i64,
        status: InquiryStatus,
    ) -> LifecycleResult<InquiryOrder> {
        Self::authorize(ctx, Capability::ManageBookings)?;

        if !self.inquiries.is_permissive() {
            let current = self
                .store
                .get_inquiry(id)
                .await?
                .ok_or_else(|| StoreError::not_found("order", id))?;
            self.inquiries.check(current.status, status)?;
        }

        let updated = self.store.update_inquiry_status(id, status).await?;
        tracing::info!(
            order_id = id,
            status = %status,
            user_id = %ctx.user_id,
            "Inquiry order status updated"
        );
        Ok(updated)
    }

    pub async fn set_cart_order_status(
        &self,
        ctx: &AuthContext,
        id: i64,
        status: CartOrderStatus,
    ) -> LifecycleResult<CartOrder> {
        Self::authorize(ctx, Capability::ManageBookings)?;

        if !self.cart_orders.is_permissive() {
            let current = self
                .store
                .get_cart_order(id)
                .await?
                .ok_or_else(|| StoreError::not_found("customer_order", id))?;
            self.cart_orders.check(current.status, status)?;
        }

        let updated = self.store.update_cart_order_status(id, status).await?;
        tracing::info!(
            customer_order_id = id,
            status = %status,
            user_id = %ctx.user_id,
            "Cart order status updated"
        );
        Ok(updated)
    }

    /// Read and unread are both reachable from either state
    pub async fn set_message_read(
        &self,
        ctx: &AuthContext,
        id: i64,
        is_read: bool,
    ) -> LifecycleResult<Message> {
        Self::authorize(ctx, Capability::TriageMessages)?;
        let updated = self.store.set_message_read(id, is_read).await?;
        tracing::debug!(message_id = id, is_read, "Message read flag updated");
        Ok(updated)
    }

    /// One bulk write; returns how many messages changed
    pub async fn mark_all_messages_read(&self, ctx: &AuthContext) -> LifecycleResult<u64> {
        Self::authorize(ctx, Capability::TriageMessages)?;
        let updated = self.store.mark_all_messages_read().await?;
        tracing::info!(updated, user_id = %ctx.user_id, "Messages marked as read");
        Ok(updated)
    }
}
