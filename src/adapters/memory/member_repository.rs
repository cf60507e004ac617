use crate::domain::{Member, MemberId};
use crate::ports::{MemberRepository as MemberRepositoryTrait, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Mutex;

use super::{StoreError, lock};

/// In-memory implementation of MemberRepository
pub struct MemberRepository {
    members: Mutex<BTreeMap<MemberId, Member>>,
}

impl MemberRepository {
    pub fn new() -> Self {
        Self {
            members: Mutex::new(BTreeMap::new()),
        }
    }
}

impl Default for MemberRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MemberRepositoryTrait for MemberRepository {
    async fn save(&self, member: Member) -> Result<()> {
        lock(&self.members, "member")?.insert(member.id.clone(), member);
        Ok(())
    }

    async fn find_by_id(&self, id: &MemberId) -> Result<Option<Member>> {
        Ok(lock(&self.members, "member")?.get(id).cloned())
    }

    async fn update(&self, member: Member) -> Result<()> {
        let mut members = lock(&self.members, "member")?;
        if !members.contains_key(&member.id) {
            return Err(StoreError::Missing {
                entity: "member",
                id: member.id.to_string(),
            }
            .into());
        }
        members.insert(member.id.clone(), member);
        Ok(())
    }

    async fn delete(&self, id: &MemberId) -> Result<()> {
        lock(&self.members, "member")?.remove(id);
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Member>> {
        Ok(lock(&self.members, "member")?.values().cloned().collect())
    }
}
