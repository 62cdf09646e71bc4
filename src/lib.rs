//! MediTrack web client
//!
//! Context-driven single page application:
//! - `api`: REST client for the MediTrack backend
//! - `session`: authentication state management
//! - `storage`: durable token storage (LocalStorage)
//! - `components`: UI layer, one module per screen

mod api;
mod models;
mod session;
mod storage;

mod components {
    pub mod add_medication;
    pub mod dashboard;
    pub mod drug_library;
    pub mod edit_medication;
    pub mod forgot_password;
    mod icons;
    pub mod login;
    mod medication_form;
    pub mod medication_list;
    pub mod navbar;
    pub mod profile;
    pub mod register;
    pub mod require_auth;
    pub mod reset_password;
    pub mod verify_email;
}

use leptos::prelude::*;
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Redirect, Route, Router, Routes},
};

use crate::api::ApiClient;
use crate::components::add_medication::AddMedicationPage;
use crate::components::dashboard::DashboardPage;
use crate::components::drug_library::DrugLibraryPage;
use crate::components::edit_medication::EditMedicationPage;
use crate::components::forgot_password::ForgotPasswordPage;
use crate::components::login::LoginPage;
use crate::components::medication_list::MedicationListPage;
use crate::components::navbar::Navbar;
use crate::components::profile::ProfilePage;
use crate::components::register::RegisterPage;
use crate::components::require_auth::{HomeRedirect, RequireAuth};
use crate::components::reset_password::ResetPasswordPage;
use crate::components::verify_email::VerifyEmailPage;
use crate::session::SessionContext;

#[component]
pub fn App() -> impl IntoView {
    // 1. API client, shared by the session store and every page
    let api = ApiClient::from_env();
    provide_context(api.clone());

    // 2. Session context, then bootstrap it from durable storage
    let session = SessionContext::new();
    provide_context(session);
    session::init_session(session, api);

    view! {
        <Router>
            <div class="min-h-screen bg-slate-50">
                <Navbar />
                <Routes fallback=|| view! { <Redirect path="/" /> }>
                    <Route path=StaticSegment("") view=HomeRedirect />
                    <Route path=StaticSegment("login") view=LoginPage />
                    <Route path=StaticSegment("register") view=RegisterPage />
                    <Route path=StaticSegment("verify-email") view=VerifyEmailPage />
                    <Route path=StaticSegment("forgot-password") view=ForgotPasswordPage />
                    <Route path=StaticSegment("reset-password") view=ResetPasswordPage />

                    <Route
                        path=StaticSegment("dashboard")
                        view=|| view! { <RequireAuth><DashboardPage /></RequireAuth> }
                    />
                    <Route
                        path=StaticSegment("drug-library")
                        view=|| view! { <RequireAuth><DrugLibraryPage /></RequireAuth> }
                    />
                    <Route
                        path=StaticSegment("profile")
                        view=|| view! { <RequireAuth><ProfilePage /></RequireAuth> }
                    />
                    <Route
                        path=StaticSegment("medications")
                        view=|| view! { <RequireAuth><MedicationListPage /></RequireAuth> }
                    />
                    <Route
                        path=(StaticSegment("medications"), StaticSegment("add"))
                        view=|| view! { <RequireAuth><AddMedicationPage /></RequireAuth> }
                    />
                    <Route
                        path=(StaticSegment("medications"), StaticSegment("edit"), ParamSegment("id"))
                        view=|| view! { <RequireAuth><EditMedicationPage /></RequireAuth> }
                    />
                </Routes>
            </div>
        </Router>
    }
}
