//! In-memory `MemberApi` double with generated member fixtures.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;

use super::MemberApi;
use crate::core::error::{AppError, Result};
use crate::features::members::models::{
    CreateMemberInput, Member, MemberGrade, MemberPage, MemberRole, MemberStatus, Pagination,
    UpdateMemberInput,
};
use crate::shared::types::PaginationQuery;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List(PaginationQuery),
    Get(i64),
    Create(CreateMemberInput),
    Update(i64, UpdateMemberInput),
    Delete(i64),
}

#[derive(Default)]
pub struct FakeMemberApi {
    members: Mutex<BTreeMap<i64, Member>>,
    list_error: Mutex<Option<AppError>>,
    write_error: Mutex<Option<AppError>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeMemberApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_member(self, member: Member) -> Self {
        self.members.lock().unwrap().insert(member.id, member);
        self
    }

    /// `count` generated members with ids `1..=count`
    pub fn with_members(self, count: i64) -> Self {
        (1..=count).fold(self, |api, id| api.with_member(member(id)))
    }

    pub fn failing_list(self, err: AppError) -> Self {
        *self.list_error.lock().unwrap() = Some(err);
        self
    }

    pub fn failing_writes(self, err: AppError) -> Self {
        *self.write_error.lock().unwrap() = Some(err);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn write_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::Create(_) | Call::Update(..) | Call::Delete(_)))
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn write_result(&self) -> Result<()> {
        match self.write_error.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn not_found(id: i64) -> AppError {
        AppError::NotFound(format!("Member {} not found", id))
    }
}

#[async_trait]
impl MemberApi for FakeMemberApi {
    async fn list_members(&self, query: PaginationQuery) -> Result<MemberPage> {
        self.record(Call::List(query));
        if let Some(err) = self.list_error.lock().unwrap().clone() {
            return Err(err);
        }

        let members = self.members.lock().unwrap();
        let total = members.len() as i64;
        let limit = query.limit.max(1);
        let skip = (query.page.saturating_sub(1) * limit) as usize;
        let data = members
            .values()
            .skip(skip)
            .take(limit as usize)
            .cloned()
            .collect();

        Ok(MemberPage {
            data,
            pagination: Pagination {
                total_members: total,
                total_pages: ((total as u32) + limit - 1) / limit,
                current_page: query.page,
                limit: query.limit,
            },
        })
    }

    async fn get_member(&self, id: i64) -> Result<Member> {
        self.record(Call::Get(id));
        self.members
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or_else(|| Self::not_found(id))
    }

    async fn create_member(&self, input: &CreateMemberInput) -> Result<Member> {
        self.record(Call::Create(input.clone()));
        self.write_result()?;
        let mut members = self.members.lock().unwrap();
        let id = members.keys().next_back().copied().unwrap_or(0) + 1;
        let created = Member {
            id,
            email: input.email.clone(),
            name: input.name.clone(),
            phone: input.phone.clone(),
            grade: input.grade,
            status: input.status,
            role: input.role,
            created_at: None,
            updated_at: None,
        };
        members.insert(id, created.clone());
        Ok(created)
    }

    async fn update_member(&self, id: i64, input: &UpdateMemberInput) -> Result<Member> {
        self.record(Call::Update(id, input.clone()));
        self.write_result()?;
        let mut members = self.members.lock().unwrap();
        let current = members.get_mut(&id).ok_or_else(|| Self::not_found(id))?;
        if let Some(name) = &input.name {
            current.name = name.clone();
        }
        if let Some(phone) = &input.phone {
            current.phone = phone.clone();
        }
        if let Some(grade) = input.grade {
            current.grade = grade;
        }
        if let Some(status) = input.status {
            current.status = status;
        }
        if let Some(role) = input.role {
            current.role = role;
        }
        Ok(current.clone())
    }

    async fn delete_member(&self, id: i64) -> Result<i64> {
        self.record(Call::Delete(id));
        self.write_result()?;
        self.members
            .lock()
            .unwrap()
            .remove(&id)
            .map(|m| m.id)
            .ok_or_else(|| Self::not_found(id))
    }
}

/// Generated member with the given id and default grade/status/role
pub fn member(id: i64) -> Member {
    Member {
        id,
        email: SafeEmail().fake(),
        name: Name().fake(),
        phone: PhoneNumber().fake(),
        grade: MemberGrade::default(),
        status: MemberStatus::default(),
        role: MemberRole::default(),
        created_at: None,
        updated_at: None,
    }
}
