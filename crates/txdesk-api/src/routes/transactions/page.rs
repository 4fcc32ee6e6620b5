//! HTML rendering of the transaction table and the modal form

use txdesk_core::{CoreError, ModalState, ReferenceData, TransactionModal, TransactionRow};
use txdesk_utils::escape_html;

/// Shown in the table container until the first fragment arrives
pub const LOADING_PLACEHOLDER: &str = "Loading...";

/// Shown in the table container when the reads failed
pub const LOAD_ERROR_PLACEHOLDER: &str = r"¯\_(ツ)_/¯";

fn test_id(id: &str, field: &str) -> String {
    escape_html(&format!("transaction-{}-{}", id, field))
}

/// Table of transaction rows, each with one edit trigger
pub fn render_table(rows: &[TransactionRow]) -> String {
    let body: String = if rows.is_empty() {
        r#"<tr data-testid='transactions-empty'><td colspan='8' class='px-4 py-8 text-center text-gray-500'>No transactions</td></tr>"#
            .to_string()
    } else {
        rows.iter().map(render_row).collect()
    };

    format!(
        r#"<table class='w-full text-sm bg-white rounded-xl shadow-sm overflow-hidden' data-testid='transactions-table'>
    <thead class='bg-indigo-600 text-white text-left'>
        <tr>
            <th class='px-4 py-3'>ID</th>
            <th class='px-4 py-3'>User</th>
            <th class='px-4 py-3'>Company</th>
            <th class='px-4 py-3'>Description</th>
            <th class='px-4 py-3'>Merchant</th>
            <th class='px-4 py-3'>Payment</th>
            <th class='px-4 py-3 text-right'>Amount</th>
            <th class='px-4 py-3'></th>
        </tr>
    </thead>
    <tbody>{}</tbody>
</table>"#,
        body
    )
}

fn render_row(row: &TransactionRow) -> String {
    let id = escape_html(&row.id);
    format!(
        r#"<tr class='border-b even:bg-gray-50 hover:bg-gray-100' data-testid='transaction-{id}'>
    <td class='px-4 py-3 font-mono text-xs' data-testid='{}'>{id}</td>
    <td class='px-4 py-3' data-testid='{}'>{}</td>
    <td class='px-4 py-3' data-testid='{}'>{}</td>
    <td class='px-4 py-3' data-testid='{}'>{}</td>
    <td class='px-4 py-3' data-testid='{}'>{}</td>
    <td class='px-4 py-3' data-testid='{}'>{}</td>
    <td class='px-4 py-3 text-right font-mono' data-testid='{}'>{}</td>
    <td class='px-4 py-3 text-right'><button class='text-indigo-600 hover:underline' hx-get='/transactions/{}/edit' hx-target='#modal-container' hx-swap='innerHTML' data-testid='{}'>Edit</button></td>
</tr>"#,
        test_id(&row.id, "id"),
        test_id(&row.id, "user"),
        escape_html(&row.user),
        test_id(&row.id, "company"),
        escape_html(&row.company),
        test_id(&row.id, "description"),
        escape_html(&row.description),
        test_id(&row.id, "merchant"),
        escape_html(&row.merchant),
        test_id(&row.id, "payment"),
        row.payment,
        test_id(&row.id, "amount"),
        escape_html(&row.amount),
        escape_html(&urlencoding::encode(&row.id)),
        test_id(&row.id, "edit"),
        id = id,
    )
}

/// Placeholder for a failed load
pub fn render_load_error(error: &CoreError) -> String {
    format!(
        r#"<div class='bg-white rounded-xl shadow-sm p-8 text-center' data-testid='load-error'>
    <p class='text-4xl text-gray-400'>{}</p>
    <p class='text-sm text-red-600 mt-4'>{}</p>
</div>"#,
        LOAD_ERROR_PLACEHOLDER,
        escape_html(&error.to_string())
    )
}

fn select<'a>(
    name: &str,
    label: &str,
    placeholder: &str,
    selected: &str,
    options: impl Iterator<Item = (&'a str, String)>,
) -> String {
    let mut html = format!(
        r#"<div>
    <label class='block text-sm font-medium text-gray-700 mb-1' for='{name}'>{label}</label>
    <select id='{name}' name='{name}' hx-post='/transactions/draft' hx-trigger='change' hx-target='#modal-container' hx-swap='innerHTML' class='w-full px-3 py-2 border rounded-lg focus:ring-2 focus:ring-indigo-500'>
        <option value='' disabled hidden {}>{placeholder}</option>"#,
        if selected.is_empty() { "selected" } else { "" },
        name = name,
        label = label,
        placeholder = placeholder,
    );
    for (value, text) in options {
        html.push_str(&format!(
            "<option value='{}' {}>{}</option>",
            escape_html(value),
            if value == selected { "selected" } else { "" },
            escape_html(&text)
        ));
    }
    html.push_str("</select></div>");
    html
}

/// The modal form, or nothing when the modal is closed
pub fn render_modal(modal: &TransactionModal, refs: &ReferenceData) -> String {
    let (title, actions) = match modal.state() {
        ModalState::Closed => return String::new(),
        ModalState::Creating => (
            "Create Transaction",
            r#"<button hx-post='/transactions' hx-target='#modal-container' hx-swap='innerHTML' class='px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700' data-testid='modal-create'>Create</button>"#
                .to_string(),
        ),
        ModalState::Editing(id) => {
            let path = escape_html(&urlencoding::encode(id));
            (
                "Edit Transaction",
                format!(
                    r#"<button hx-delete='/transactions/{path}' hx-target='#modal-container' hx-swap='innerHTML' class='px-4 py-2 bg-red-600 text-white rounded-lg hover:bg-red-700' data-testid='modal-delete'>Delete</button>
<button hx-put='/transactions/{path}' hx-target='#modal-container' hx-swap='innerHTML' class='px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700' data-testid='modal-update'>Update</button>"#,
                    path = path
                ),
            )
        }
    };

    let draft = modal.draft();
    let users = select(
        "userId",
        "User",
        "Select User",
        &draft.user_id,
        refs.users.iter().map(|u| (u.id.as_str(), u.full_name())),
    );
    let merchants = select(
        "merchantId",
        "Merchant",
        "Select Merchant",
        &draft.merchant_id,
        refs.merchants.iter().map(|m| (m.id.as_str(), m.name.clone())),
    );
    let companies = select(
        "companyId",
        "Company",
        "Select Company",
        &draft.company_id,
        refs.companies.iter().map(|c| (c.id.as_str(), c.name.clone())),
    );

    let error = modal
        .error()
        .map(|e| {
            format!(
                r#"<p class='text-sm text-red-600 bg-red-50 border border-red-200 rounded-lg p-3' data-testid='modal-error'>{}</p>"#,
                escape_html(e)
            )
        })
        .unwrap_or_default();

    let draft_input = "hx-post='/transactions/draft' hx-trigger='change' hx-target='#modal-container' hx-swap='innerHTML'";

    format!(
        r#"<div class='fixed inset-0 bg-black bg-opacity-40 flex items-center justify-center z-50' data-testid='transaction-modal'>
    <div class='bg-white rounded-xl shadow-xl w-full max-w-md p-6 space-y-4'>
        <h2 class='text-lg font-semibold'>{title}</h2>
        {error}
        {users}
        {merchants}
        {companies}
        <div>
            <label class='block text-sm font-medium text-gray-700 mb-1' for='description'>Description</label>
            <input id='description' name='description' value='{description}' {draft_input} class='w-full px-3 py-2 border rounded-lg'>
        </div>
        <div>
            <label class='block text-sm font-medium text-gray-700 mb-1' for='amount'>Amount</label>
            <input id='amount' name='amount' type='number' value='{amount}' {draft_input} class='w-full px-3 py-2 border rounded-lg'>
        </div>
        <fieldset>
            <legend class='block text-sm font-medium text-gray-700 mb-1'>Form of payment</legend>
            <label class='mr-4'><input type='radio' id='debit' name='payment' value='debit' {debit} {draft_input}> Debit</label>
            <label><input type='radio' id='credit' name='payment' value='credit' {credit} {draft_input}> Credit</label>
        </fieldset>
        <div class='flex justify-end gap-2 pt-2'>
            <button hx-post='/transactions/modal/close' hx-target='#modal-container' hx-swap='innerHTML' class='px-4 py-2 border rounded-lg hover:bg-gray-50' data-testid='modal-close'>Close</button>
            {actions}
        </div>
    </div>
</div>"#,
        title = title,
        error = error,
        users = users,
        merchants = merchants,
        companies = companies,
        description = escape_html(&draft.description),
        amount = draft.amount,
        debit = if draft.debit() { "checked" } else { "" },
        credit = if draft.credit() { "checked" } else { "" },
        draft_input = draft_input,
        actions = actions,
    )
}
