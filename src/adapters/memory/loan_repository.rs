use crate::domain::{Loan, LoanId, MemberId};
use crate::ports::{LoanRepository as LoanRepositoryTrait, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Mutex;

use super::{StoreError, lock};

/// In-memory implementation of LoanRepository
///
/// Loans are indexed by id; per-member queries filter the active set,
/// which stays small because returned loans are deleted.
pub struct LoanRepository {
    loans: Mutex<BTreeMap<LoanId, Loan>>,
}

impl LoanRepository {
    pub fn new() -> Self {
        Self {
            loans: Mutex::new(BTreeMap::new()),
        }
    }
}

impl Default for LoanRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LoanRepositoryTrait for LoanRepository {
    async fn save(&self, loan: Loan) -> Result<()> {
        lock(&self.loans, "loan")?.insert(loan.id.clone(), loan);
        Ok(())
    }

    async fn find_by_id(&self, id: &LoanId) -> Result<Option<Loan>> {
        Ok(lock(&self.loans, "loan")?.get(id).cloned())
    }

    async fn update(&self, loan: Loan) -> Result<()> {
        let mut loans = lock(&self.loans, "loan")?;
        if !loans.contains_key(&loan.id) {
            return Err(StoreError::Missing {
                entity: "loan",
                id: loan.id.to_string(),
            }
            .into());
        }
        loans.insert(loan.id.clone(), loan);
        Ok(())
    }

    async fn delete(&self, id: &LoanId) -> Result<()> {
        lock(&self.loans, "loan")?.remove(id);
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Loan>> {
        Ok(lock(&self.loans, "loan")?.values().cloned().collect())
    }

    /// Oldest loan first
    async fn find_by_member_id(&self, member_id: &MemberId) -> Result<Vec<Loan>> {
        let mut loans: Vec<Loan> = lock(&self.loans, "loan")?
            .values()
            .filter(|l| &l.member_id == member_id)
            .cloned()
            .collect();
        loans.sort_by_key(|l| l.borrowed_at);
        Ok(loans)
    }
}
