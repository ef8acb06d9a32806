//! Two-column frame shared by the sign-in, sign-up, and reset forms.

use leptos::prelude::*;

#[component]
pub fn AuthLayout(title: &'static str, children: Children) -> impl IntoView {
    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1 class="auth-card__brand">"Fixlit IoT"</h1>
                <h2 class="auth-card__title">{title}</h2>
                {children()}
            </div>
            <aside class="auth-aside">
                <h2>"Fixlit IoT Platform"</h2>
                <p>"Connect, monitor, and control your IoT devices with ease."</p>
            </aside>
        </div>
    }
}
