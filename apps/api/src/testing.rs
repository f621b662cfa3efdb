//! In-memory stand-ins for the identity provider and the remote table.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::auth::provider::IdentityProvider;
use crate::auth::screen::Credentials;
use crate::auth::session::CurrentUser;
use crate::dashboard::store::ApplicationStore;
use crate::models::application::{
    ApplicationFields, ApplicationStatus, JobApplication, NewApplication,
};
use crate::models::user::{AuthUser, Session};
use crate::supabase::ProviderError;

fn api_error(status: u16, message: &str) -> ProviderError {
    ProviderError::Api {
        status,
        message: message.to_string(),
    }
}

pub fn current_user(id: Uuid) -> CurrentUser {
    CurrentUser {
        user: AuthUser {
            id,
            email: Some(format!("{id}@example.com")),
        },
        access_token: format!("token-{id}"),
    }
}

/// Mirrors the table with row-level security on: callers only see and
/// touch their own rows.
#[derive(Default)]
pub struct InMemoryStore {
    rows: Mutex<Vec<JobApplication>>,
    next_id: AtomicI64,
    calls: AtomicUsize,
    failure: Mutex<Option<(usize, String)>>,
}

impl InMemoryStore {
    /// Makes the next store call fail with `message`.
    pub fn fail_next(&self, message: &str) {
        self.fail_call(0, message);
    }

    /// Lets `skip` calls through, then fails the one after with `message`.
    pub fn fail_call(&self, skip: usize, message: &str) {
        *self.failure.lock().unwrap() = Some((skip, message.to_string()));
    }

    /// Number of store calls made so far. Seeding does not count.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn rows(&self) -> Vec<JobApplication> {
        self.rows.lock().unwrap().clone()
    }

    fn next_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn begin_call(&self) -> Result<(), ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut failure = self.failure.lock().unwrap();
        match failure.take() {
            Some((0, message)) => Err(api_error(400, &message)),
            Some((skip, message)) => {
                *failure = Some((skip - 1, message));
                Ok(())
            }
            None => Ok(()),
        }
    }
}

/// Inserts a row directly and returns its id.
pub fn seed(store: &InMemoryStore, owner: Uuid, company: &str, date: &str) -> i64 {
    let id = store.next_id();
    store.rows.lock().unwrap().push(JobApplication {
        id,
        user_id: owner,
        company_name: company.to_string(),
        role: "Engineer".to_string(),
        application_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        status: ApplicationStatus::Applied,
        notes: String::new(),
    });
    id
}

#[async_trait]
impl ApplicationStore for InMemoryStore {
    async fn list_for_owner(
        &self,
        caller: &CurrentUser,
    ) -> Result<Vec<JobApplication>, ProviderError> {
        self.begin_call()?;
        let mut rows: Vec<_> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.user_id == caller.id())
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.application_date.cmp(&a.application_date));
        Ok(rows)
    }

    async fn insert(
        &self,
        _caller: &CurrentUser,
        application: &NewApplication,
    ) -> Result<JobApplication, ProviderError> {
        self.begin_call()?;
        let fields = application.fields.clone();
        let row = JobApplication {
            id: self.next_id(),
            user_id: application.user_id,
            company_name: fields.company_name,
            role: fields.role,
            application_date: fields.application_date,
            status: fields.status,
            notes: fields.notes,
        };
        self.rows.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn update(
        &self,
        caller: &CurrentUser,
        id: i64,
        fields: &ApplicationFields,
    ) -> Result<(), ProviderError> {
        self.begin_call()?;
        let mut rows = self.rows.lock().unwrap();
        if let Some(row) = rows
            .iter_mut()
            .find(|r| r.id == id && r.user_id == caller.id())
        {
            row.company_name = fields.company_name.clone();
            row.role = fields.role.clone();
            row.application_date = fields.application_date;
            row.status = fields.status;
            row.notes = fields.notes.clone();
        }
        Ok(())
    }

    async fn update_status(
        &self,
        caller: &CurrentUser,
        id: i64,
        status: ApplicationStatus,
    ) -> Result<(), ProviderError> {
        self.begin_call()?;
        let mut rows = self.rows.lock().unwrap();
        if let Some(row) = rows
            .iter_mut()
            .find(|r| r.id == id && r.user_id == caller.id())
        {
            row.status = status;
        }
        Ok(())
    }

    async fn delete(&self, caller: &CurrentUser, id: i64) -> Result<(), ProviderError> {
        self.begin_call()?;
        self.rows
            .lock()
            .unwrap()
            .retain(|r| !(r.id == id && r.user_id == caller.id()));
        Ok(())
    }
}

struct Account {
    password: String,
    user: AuthUser,
    confirmed: bool,
}

#[derive(Default)]
pub struct FakeIdentity {
    accounts: Mutex<HashMap<String, Account>>,
    sessions: Mutex<HashMap<String, AuthUser>>,
    calls: AtomicUsize,
    outage: Mutex<Option<(u16, String)>>,
}

impl FakeIdentity {
    /// An account whose email link has already been followed.
    pub fn register_confirmed(&self, email: &str, password: &str) -> AuthUser {
        let user = AuthUser {
            id: Uuid::new_v4(),
            email: Some(email.to_string()),
        };
        self.accounts.lock().unwrap().insert(
            email.to_string(),
            Account {
                password: password.to_string(),
                user: user.clone(),
                confirmed: true,
            },
        );
        user
    }

    /// Issues an access token for `user` without going through sign-in.
    pub fn grant_session(&self, user: &AuthUser) -> String {
        let token = format!("token-{}", Uuid::new_v4());
        self.sessions
            .lock()
            .unwrap()
            .insert(token.clone(), user.clone());
        token
    }

    /// Makes the next `get_user` fail with `status` regardless of the token.
    pub fn fail_next_get_user(&self, status: u16, message: &str) {
        *self.outage.lock().unwrap() = Some((status, message.to_string()));
    }

    pub fn has_account(&self, email: &str) -> bool {
        self.accounts.lock().unwrap().contains_key(email)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentity {
    async fn sign_up(&self, credentials: &Credentials) -> Result<AuthUser, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.contains_key(&credentials.email) {
            return Err(api_error(422, "User already registered"));
        }
        let user = AuthUser {
            id: Uuid::new_v4(),
            email: Some(credentials.email.clone()),
        };
        accounts.insert(
            credentials.email.clone(),
            Account {
                password: credentials.password.clone(),
                user: user.clone(),
                confirmed: false,
            },
        );
        Ok(user)
    }

    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let user = {
            let accounts = self.accounts.lock().unwrap();
            match accounts.get(&credentials.email) {
                Some(account) if account.password == credentials.password => {
                    if !account.confirmed {
                        return Err(api_error(400, "Email not confirmed"));
                    }
                    account.user.clone()
                }
                _ => return Err(api_error(400, "Invalid login credentials")),
            }
        };
        let access_token = self.grant_session(&user);
        Ok(Session {
            access_token,
            token_type: "bearer".to_string(),
            expires_in: Some(3600),
            refresh_token: None,
            user,
        })
    }

    async fn get_user(&self, access_token: &str) -> Result<AuthUser, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some((status, message)) = self.outage.lock().unwrap().take() {
            return Err(api_error(status, &message));
        }
        self.sessions
            .lock()
            .unwrap()
            .get(access_token)
            .cloned()
            .ok_or_else(|| api_error(401, "invalid JWT"))
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.sessions.lock().unwrap().remove(access_token);
        Ok(())
    }
}
