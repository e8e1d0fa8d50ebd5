// SPDX-FileCopyrightText: 2026 Kennel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTML fragment rendering for htmx partial updates.
//!
//! Rendering is pure: a [`Fragment`] is built from record data and the
//! current selection and turned into markup. Every interpolated value goes
//! through [`Escaped`].

use std::fmt::{self, Write as _};

use axum::response::{Html, IntoResponse, Response};
use kennel_core::{Dog, DogId};
use strum::{Display, IntoStaticStr};

/// htmx `hx-swap` values used by the fragments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum SwapStyle {
    AfterBegin,
    Delete,
    None,
}

/// Display wrapper that HTML-escapes its contents.
pub struct Escaped<'a>(pub &'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rest = self.0;
        while let Some(pos) = rest.find(['&', '<', '>', '"', '\'']) {
            f.write_str(&rest[..pos])?;
            let entity = match rest.as_bytes()[pos] {
                b'&' => "&amp;",
                b'<' => "&lt;",
                b'>' => "&gt;",
                b'"' => "&quot;",
                _ => "&#39;",
            };
            f.write_str(entity)?;
            rest = &rest[pos + 1..];
        }
        f.write_str(rest)
    }
}

/// Where the form submits to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormTarget {
    Create,
    Update(DogId),
}

/// Input to the form fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub target: FormTarget,
    pub name: String,
    pub breed: String,
}

impl FormView {
    /// Empty form wired for creation.
    pub fn create() -> Self {
        Self {
            target: FormTarget::Create,
            name: String::new(),
            breed: String::new(),
        }
    }

    /// Form wired to update `id`, pre-filled from `dog` when the record
    /// still exists.
    pub fn update(id: DogId, dog: Option<&Dog>) -> Self {
        let (name, breed) = dog
            .map(|d| (d.name.clone(), d.breed.clone()))
            .unwrap_or_default();
        Self {
            target: FormTarget::Update(id),
            name,
            breed,
        }
    }
}

/// A renderable partial document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// One table row. `update` marks it for out-of-band replacement of the
    /// row with the same id.
    Row { dog: Dog, update: bool },
    /// All table rows, in the given order.
    Rows(Vec<Dog>),
    /// The create/edit form.
    Form(FormView),
}

impl Fragment {
    pub fn render(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_to(&mut out);
        out
    }

    fn write_to(&self, out: &mut String) -> fmt::Result {
        match self {
            Self::Row { dog, update } => write_row(out, dog, *update),
            Self::Rows(dogs) => dogs.iter().try_for_each(|dog| write_row(out, dog, false)),
            Self::Form(view) => write_form(out, view),
        }
    }
}

impl IntoResponse for Fragment {
    fn into_response(self) -> Response {
        Html(self.render()).into_response()
    }
}

fn write_row(out: &mut String, dog: &Dog, update: bool) -> fmt::Result {
    let id = dog.id;
    write!(out, r#"<tr class="on-hover" id="row-{id}""#)?;
    if update {
        out.push_str(r#" hx-swap-oob="true""#);
    }
    write!(
        out,
        "><td>{}</td><td>{}</td>",
        Escaped(&dog.name),
        Escaped(&dog.breed)
    )?;
    write!(
        out,
        concat!(
            r#"<td class="buttons">"#,
            r#"<button class="show-on-hover" hx-confirm="Are you sure?" hx-delete="/dog/{id}" "#,
            r#"hx-target="closest tr" hx-swap="{delete}" type="button">✕</button>"#,
            r#"<button class="show-on-hover" hx-get="/select/{id}" hx-swap="{none}" "#,
            r#"type="button">✎</button>"#,
            "</td></tr>"
        ),
        id = id,
        delete = SwapStyle::Delete,
        none = SwapStyle::None,
    )
}

fn write_form(out: &mut String, view: &FormView) -> fmt::Result {
    out.push_str(r##"<form hx-disabled-elt="#submit-btn" hx-on:htmx:after-request="this.reset()" "##);
    match view.target {
        FormTarget::Create => write!(
            out,
            r#"hx-post="/dog" hx-target="tbody" hx-swap="{}">"#,
            SwapStyle::AfterBegin
        )?,
        FormTarget::Update(id) => write!(out, r#"hx-put="/dog/{id}">"#)?,
    }
    write_input(out, "name", "Name", &view.name)?;
    write_input(out, "breed", "Breed", &view.breed)?;
    out.push_str("<div class=\"buttons\">");
    match view.target {
        FormTarget::Create => out.push_str(r#"<button id="submit-btn">Add</button>"#),
        FormTarget::Update(_) => {
            out.push_str(r#"<button id="submit-btn">Update</button>"#);
            write!(
                out,
                r#"<button hx-get="/deselect" hx-swap="{}" type="button">Cancel</button>"#,
                SwapStyle::None
            )?;
        }
    }
    out.push_str("</div></form>");
    Ok(())
}

fn write_input(out: &mut String, field: &str, label: &str, value: &str) -> fmt::Result {
    write!(
        out,
        r#"<div><label for="{field}">{label}</label><input id="{field}" name="{field}" required size="30" type="text" value="{}"></div>"#,
        Escaped(value)
    )
}
