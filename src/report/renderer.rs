//! Plain-text report rendering
//!
//! Pure: aggregates in, text out. Writing the text is the pipeline's job.

use std::fmt::{self, Write};

use crate::aggregate::CompanyAggregate;
use crate::records::CreditedUser;

const INDENT: &str = "    ";

/// Renders the report for all companies, one block per company.
///
/// Each block ends with a blank line. An empty slice renders as "".
pub fn render(aggregates: &[CompanyAggregate]) -> String {
    let mut out = String::new();
    for aggregate in aggregates {
        // Writing into a String cannot fail.
        let _ = render_company(&mut out, aggregate);
    }
    out
}

/// Appends one company block
pub fn render_company(out: &mut impl Write, aggregate: &CompanyAggregate) -> fmt::Result {
    writeln!(out, "Company Id: {}", aggregate.company_id)?;
    writeln!(out, "Company Name: {}", aggregate.company_name)?;

    writeln!(out, "Users Emailed:")?;
    for user in &aggregate.users_emailed {
        render_user(out, user)?;
    }

    writeln!(out, "Users Not Emailed:")?;
    for user in &aggregate.users_not_emailed {
        render_user(out, user)?;
    }

    writeln!(
        out,
        "{}Total amount of top ups for {}: {}",
        INDENT, aggregate.company_name, aggregate.total_top_ups
    )?;
    writeln!(out)
}

fn render_user(out: &mut impl Write, credited: &CreditedUser) -> fmt::Result {
    let user = &credited.user;
    writeln!(out, "{}{}, {}, {}", INDENT, user.last_name, user.first_name, user.email)?;
    writeln!(out, "{0}{0}Previous Token Balance, {1}", INDENT, user.tokens)?;
    writeln!(out, "{0}{0}New Token Balance {1}", INDENT, credited.tokens_updated)
}
