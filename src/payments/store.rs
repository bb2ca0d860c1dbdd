use crate::payments::types::Payment;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Key-value persistence of payment records.
#[async_trait]
pub trait PaymentStore: Send + Sync {
    /// Inserts or overwrites the record at `payment.id`.
    async fn put(&self, payment: Payment);

    async fn get(&self, id: Uuid) -> Option<Payment>;
}

/// Process-local store. Clones share the same map; nothing survives a restart.
#[derive(Clone, Default)]
pub struct InMemoryPaymentStore {
    payments: Arc<RwLock<HashMap<Uuid, Payment>>>,
}

impl InMemoryPaymentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.payments.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.payments.read().await.is_empty()
    }
}

#[async_trait]
impl PaymentStore for InMemoryPaymentStore {
    async fn put(&self, payment: Payment) {
        self.payments.write().await.insert(payment.id, payment);
    }

    async fn get(&self, id: Uuid) -> Option<Payment> {
        self.payments.read().await.get(&id).cloned()
    }
}
