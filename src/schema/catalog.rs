//! Static HR-side schema catalog
//!
//! Read-only lookup tables for the ZenHR API: endpoints, their fields and
//! filters, and the required/optional field sets used by create requests.
//! Unknown endpoint ids resolve to empty lists.

use super::types::{EndpointDescriptor, FieldDescriptor, FieldType, FilterDescriptor, FilterType};

/// Default base URL of the HR API
pub const DEFAULT_BASE_URL: &str = "https://api.zenhr.com/api/v2";

/// Endpoint id preselected for a fresh session
pub const DEFAULT_ENDPOINT: &str = "employees";

type FieldRow = (&'static str, &'static str, FieldType, &'static str, &'static str);
type FilterRow = (&'static str, &'static str, FilterType, &'static str);

const ENDPOINTS: &[(&str, &str, &str)] = &[
    ("employees", "Employees", "Employee records and personal information"),
    ("attendance", "Attendance", "Employee attendance records"),
    ("payroll", "Payroll", "Payroll data for employees"),
    ("professional_data", "Professional Data", "Professional qualifications and skills"),
    ("leaves", "Leaves", "Leave requests and time off management"),
    ("documents", "Documents", "Employee documents and files"),
    ("departments", "Departments", "Company departments and structure"),
    ("company_announcements", "Company Announcements", "Company-wide announcements and notifications"),
];

use FieldType::{Array, Date, Datetime, Number, String as Text};

const EMPLOYEE_FIELDS: &[FieldRow] = &[
    ("id", "ID", Text, "Basic Info", "Unique identifier for the employee"),
    ("first_name", "First Name", Text, "Basic Info", "Employee's first name"),
    ("last_name", "Last Name", Text, "Basic Info", "Employee's last name"),
    ("email", "Email", Text, "Contact", "Employee's email address"),
    ("phone", "Phone", Text, "Contact", "Employee's phone number"),
    ("hire_date", "Hire Date", Date, "Employment", "Date the employee was hired"),
    ("department", "Department", Text, "Employment", "Employee's department"),
    ("position", "Position", Text, "Employment", "Employee's job position"),
    ("status", "Status", Text, "Employment", "Employment status (active, terminated, on leave)"),
    ("manager_id", "Manager ID", Text, "Employment", "ID of employee's manager"),
    ("salary", "Salary", Number, "Financial", "Employee's current salary"),
    ("address", "Address", Text, "Contact", "Employee's address"),
    ("city", "City", Text, "Contact", "Employee's city"),
    ("country", "Country", Text, "Contact", "Employee's country"),
    ("birth_date", "Birth Date", Date, "Personal", "Employee's date of birth"),
    ("gender", "Gender", Text, "Personal", "Employee's gender"),
    ("nationality", "Nationality", Text, "Personal", "Employee's nationality"),
    ("emergency_contact", "Emergency Contact", Text, "Contact", "Emergency contact information"),
];

const ATTENDANCE_FIELDS: &[FieldRow] = &[
    ("id", "ID", Text, "Basic Info", "Unique identifier for the attendance record"),
    ("employee_id", "Employee ID", Text, "Basic Info", "ID of the employee"),
    ("date", "Date", Date, "Attendance", "Date of the attendance record"),
    ("check_in", "Check In", Datetime, "Attendance", "Check-in time"),
    ("check_out", "Check Out", Datetime, "Attendance", "Check-out time"),
    ("status", "Status", Text, "Attendance", "Attendance status (present, absent, late)"),
    ("hours_worked", "Hours Worked", Number, "Attendance", "Total hours worked"),
    ("overtime", "Overtime", Number, "Attendance", "Overtime hours"),
    ("notes", "Notes", Text, "Additional", "Additional notes for this record"),
    ("location", "Location", Text, "Additional", "Location of check-in/check-out"),
];

const PAYROLL_FIELDS: &[FieldRow] = &[
    ("id", "ID", Text, "Basic Info", "Unique identifier for the payroll record"),
    ("employee_id", "Employee ID", Text, "Basic Info", "ID of the employee"),
    ("period_start", "Period Start", Date, "Period", "Start date of pay period"),
    ("period_end", "Period End", Date, "Period", "End date of pay period"),
    ("basic_salary", "Basic Salary", Number, "Financial", "Basic salary amount"),
    ("overtime", "Overtime", Number, "Financial", "Overtime payment"),
    ("bonus", "Bonus", Number, "Financial", "Bonus amount"),
    ("deductions", "Deductions", Number, "Financial", "Total deductions"),
    ("tax", "Tax", Number, "Financial", "Tax amount"),
    ("net_pay", "Net Pay", Number, "Financial", "Net pay amount"),
    ("payment_date", "Payment Date", Date, "Financial", "Date payment was processed"),
    ("payment_method", "Payment Method", Text, "Financial", "Method of payment"),
    ("currency", "Currency", Text, "Financial", "Payment currency"),
];

const LEAVE_FIELDS: &[FieldRow] = &[
    ("id", "ID", Text, "Basic Info", "Unique identifier for the leave request"),
    ("employee_id", "Employee ID", Text, "Basic Info", "ID of the employee"),
    ("start_date", "Start Date", Date, "Leave", "Start date of leave"),
    ("end_date", "End Date", Date, "Leave", "End date of leave"),
    ("leave_type", "Leave Type", Text, "Leave", "Type of leave (annual, sick, etc.)"),
    ("status", "Status", Text, "Leave", "Status of leave request (pending, approved, rejected)"),
    ("reason", "Reason", Text, "Leave", "Reason for leave request"),
    ("approved_by", "Approved By", Text, "Leave", "ID of the manager who approved the request"),
    ("days_count", "Days Count", Number, "Leave", "Number of leave days"),
];

const DOCUMENT_FIELDS: &[FieldRow] = &[
    ("id", "ID", Text, "Basic Info", "Unique identifier for the document"),
    ("employee_id", "Employee ID", Text, "Basic Info", "ID of the employee"),
    ("title", "Title", Text, "Document", "Document title"),
    ("type", "Type", Text, "Document", "Document type (contract, ID, etc.)"),
    ("upload_date", "Upload Date", Date, "Document", "Date the document was uploaded"),
    ("expiry_date", "Expiry Date", Date, "Document", "Expiration date of the document"),
    ("file_name", "File Name", Text, "Document", "Name of the document file"),
    ("file_size", "File Size", Number, "Document", "Size of the document file in bytes"),
    ("file_type", "File Type", Text, "Document", "Type of file (PDF, DOCX, etc.)"),
];

const PROFESSIONAL_FIELDS: &[FieldRow] = &[
    ("id", "ID", Text, "Basic Info", "Unique identifier"),
    ("employee_id", "Employee ID", Text, "Basic Info", "Associated employee ID"),
    ("education", "Education", Text, "Education", "Education details"),
    ("degree", "Degree", Text, "Education", "Highest degree achieved"),
    ("institution", "Institution", Text, "Education", "Educational institution"),
    ("graduation_year", "Graduation Year", Number, "Education", "Year of graduation"),
    ("skills", "Skills", Array, "Skills", "List of skills"),
    ("certifications", "Certifications", Array, "Skills", "Professional certifications"),
    ("languages", "Languages", Array, "Skills", "Languages spoken"),
    ("previous_experience", "Previous Experience", Text, "Experience", "Previous work experience"),
];

const DEPARTMENT_FIELDS: &[FieldRow] = &[
    ("id", "ID", Text, "Basic Info", "Unique identifier for the department"),
    ("name", "Name", Text, "Basic Info", "Department name"),
    ("code", "Code", Text, "Basic Info", "Department code"),
    ("manager_id", "Manager ID", Text, "Management", "ID of department manager"),
    ("parent_id", "Parent Department ID", Text, "Structure", "ID of parent department"),
    ("description", "Description", Text, "Details", "Department description"),
    ("location", "Location", Text, "Details", "Department location"),
    ("created_at", "Created At", Datetime, "System", "Creation timestamp"),
    ("updated_at", "Updated At", Datetime, "System", "Last update timestamp"),
];

const ANNOUNCEMENT_FIELDS: &[FieldRow] = &[
    ("id", "ID", Text, "Basic Info", "Unique identifier for the announcement"),
    ("title", "Title", Text, "Content", "Announcement title"),
    ("content", "Content", Text, "Content", "Announcement content"),
    ("author_id", "Author ID", Text, "Basic Info", "ID of the author"),
    ("publish_date", "Publish Date", Date, "Publication", "Date of publication"),
    ("expiry_date", "Expiry Date", Date, "Publication", "Expiration date"),
    ("priority", "Priority", Text, "Publication", "Announcement priority (low, medium, high)"),
    ("target_departments", "Target Departments", Array, "Audience", "Departments targeted by the announcement"),
    ("attachment_url", "Attachment URL", Text, "Content", "URL to attached file"),
];

use FilterType::{Date as FDate, Number as FNumber, String as FText};

const EMPLOYEE_FILTERS: &[FilterRow] = &[
    ("department", "Department", FText, "Filter by department name"),
    ("status", "Status", FText, "Filter by employment status"),
    ("hire_date_from", "Hire Date From", FDate, "Filter by hire date (from)"),
    ("hire_date_to", "Hire Date To", FDate, "Filter by hire date (to)"),
    ("manager_id", "Manager ID", FText, "Filter by manager ID"),
    ("position", "Position", FText, "Filter by job position"),
];

const ATTENDANCE_FILTERS: &[FilterRow] = &[
    ("employee_id", "Employee ID", FText, "Filter by employee ID"),
    ("date_from", "Date From", FDate, "Filter by date range (from)"),
    ("date_to", "Date To", FDate, "Filter by date range (to)"),
    ("status", "Status", FText, "Filter by attendance status"),
];

const PAYROLL_FILTERS: &[FilterRow] = &[
    ("employee_id", "Employee ID", FText, "Filter by employee ID"),
    ("period_start", "Period Start", FDate, "Filter by period start date"),
    ("period_end", "Period End", FDate, "Filter by period end date"),
    ("payment_date_from", "Payment Date From", FDate, "Filter by payment date (from)"),
    ("payment_date_to", "Payment Date To", FDate, "Filter by payment date (to)"),
];

const LEAVE_FILTERS: &[FilterRow] = &[
    ("employee_id", "Employee ID", FText, "Filter by employee ID"),
    ("start_date_from", "Start Date From", FDate, "Filter by start date (from)"),
    ("start_date_to", "Start Date To", FDate, "Filter by start date (to)"),
    ("status", "Status", FText, "Filter by request status"),
    ("leave_type", "Leave Type", FText, "Filter by leave type"),
];

const DOCUMENT_FILTERS: &[FilterRow] = &[
    ("employee_id", "Employee ID", FText, "Filter by employee ID"),
    ("type", "Document Type", FText, "Filter by document type"),
    ("upload_date_from", "Upload Date From", FDate, "Filter by upload date (from)"),
    ("upload_date_to", "Upload Date To", FDate, "Filter by upload date (to)"),
    ("expiry_date_from", "Expiry Date From", FDate, "Filter by expiry date (from)"),
    ("expiry_date_to", "Expiry Date To", FDate, "Filter by expiry date (to)"),
];

const PROFESSIONAL_FILTERS: &[FilterRow] = &[
    ("employee_id", "Employee ID", FText, "Filter by employee ID"),
    ("degree", "Degree", FText, "Filter by degree"),
    ("graduation_year_from", "Graduation Year From", FNumber, "Filter by graduation year (from)"),
    ("graduation_year_to", "Graduation Year To", FNumber, "Filter by graduation year (to)"),
    ("skill", "Skill", FText, "Filter by skill"),
];

const DEPARTMENT_FILTERS: &[FilterRow] = &[
    ("name", "Department Name", FText, "Filter by department name"),
    ("code", "Department Code", FText, "Filter by department code"),
    ("manager_id", "Manager ID", FText, "Filter by manager ID"),
    ("parent_id", "Parent Department ID", FText, "Filter by parent department ID"),
    ("location", "Location", FText, "Filter by location"),
];

const ANNOUNCEMENT_FILTERS: &[FilterRow] = &[
    ("author_id", "Author ID", FText, "Filter by author ID"),
    ("publish_date_from", "Publish Date From", FDate, "Filter by publish date (from)"),
    ("publish_date_to", "Publish Date To", FDate, "Filter by publish date (to)"),
    ("priority", "Priority", FText, "Filter by priority level"),
    ("target_department", "Target Department", FText, "Filter by target department"),
];

/// Example values and allowed options shown next to filter inputs
const FILTER_HINTS: &[(&str, &str, &str, &[&str])] = &[
    ("employees", "hire_date_from", "2023-01-01", &[]),
    ("employees", "hire_date_to", "2023-12-31", &[]),
    ("employees", "status", "active", &["active", "inactive", "on_leave", "terminated"]),
    ("attendance", "employee_id", "12345", &[]),
    ("attendance", "date_from", "2023-01-01", &[]),
    ("attendance", "date_to", "2023-01-31", &[]),
    ("attendance", "status", "present", &["present", "absent", "late", "early_departure"]),
    ("payroll", "employee_id", "12345", &[]),
    ("payroll", "period_start", "2023-01-01", &[]),
    ("payroll", "period_end", "2023-01-31", &[]),
    ("payroll", "payment_date_from", "2023-02-01", &[]),
    ("payroll", "payment_date_to", "2023-02-05", &[]),
    ("leaves", "employee_id", "12345", &[]),
    ("leaves", "start_date_from", "2023-01-01", &[]),
    ("leaves", "start_date_to", "2023-12-31", &[]),
    ("leaves", "status", "approved", &["pending", "approved", "rejected", "cancelled"]),
    ("documents", "employee_id", "12345", &[]),
    ("documents", "type", "contract", &["contract", "id", "resume", "certificate", "other"]),
];

const REQUIRED_FIELDS: &[(&str, &[&str])] = &[
    ("employees", &["first_name", "last_name", "email", "hire_date"]),
    ("attendance", &["employee_id", "date", "check_in"]),
    ("payroll", &["employee_id", "period_start", "period_end", "basic_salary"]),
    ("leaves", &["employee_id", "start_date", "end_date", "leave_type"]),
    ("documents", &["employee_id", "title", "type"]),
    ("professional_data", &["employee_id", "education"]),
    ("departments", &["name", "code"]),
    ("company_announcements", &["title", "content", "publish_date"]),
];

const OPTIONAL_FIELDS: &[(&str, &[&str])] = &[
    ("employees", &[
        "department", "position", "status", "manager_id", "salary", "phone", "address",
        "city", "country", "birth_date", "gender", "nationality", "emergency_contact",
    ]),
    ("attendance", &["check_out", "status", "notes", "hours_worked", "overtime", "location"]),
    ("payroll", &["overtime", "bonus", "deductions", "tax", "payment_date", "payment_method", "currency"]),
    ("leaves", &["reason", "status", "days_count"]),
    ("documents", &["upload_date", "expiry_date", "file_name", "file_size", "file_type"]),
    ("professional_data", &[
        "degree", "institution", "graduation_year", "skills", "certifications", "languages",
        "previous_experience",
    ]),
    ("departments", &["manager_id", "parent_id", "description", "location"]),
    ("company_announcements", &["expiry_date", "priority", "target_departments", "attachment_url", "author_id"]),
];

const SAMPLE_VALUES: &[(&str, &str)] = &[
    ("first_name", "John"),
    ("last_name", "Doe"),
    ("email", "john.doe@example.com"),
    ("hire_date", "2023-06-15"),
    ("employee_id", "12345"),
    ("date", "2023-06-15"),
    ("check_in", "09:00:00"),
    ("start_date", "2023-06-15"),
    ("end_date", "2023-06-20"),
    ("leave_type", "annual"),
    ("period_start", "2023-06-01"),
    ("period_end", "2023-06-30"),
    ("basic_salary", "5000"),
    ("title", "Sample Document"),
    ("type", "contract"),
    ("name", "Sample Name"),
    ("code", "SAMPLE001"),
    ("content", "Sample content"),
    ("publish_date", "2023-06-15"),
];

fn field_rows(endpoint_id: &str) -> &'static [FieldRow] {
    match endpoint_id {
        "employees" => EMPLOYEE_FIELDS,
        "attendance" => ATTENDANCE_FIELDS,
        "payroll" => PAYROLL_FIELDS,
        "leaves" => LEAVE_FIELDS,
        "documents" => DOCUMENT_FIELDS,
        "professional_data" => PROFESSIONAL_FIELDS,
        "departments" => DEPARTMENT_FIELDS,
        "company_announcements" => ANNOUNCEMENT_FIELDS,
        _ => &[],
    }
}

fn filter_rows(endpoint_id: &str) -> &'static [FilterRow] {
    match endpoint_id {
        "employees" => EMPLOYEE_FILTERS,
        "attendance" => ATTENDANCE_FILTERS,
        "payroll" => PAYROLL_FILTERS,
        "leaves" => LEAVE_FILTERS,
        "documents" => DOCUMENT_FILTERS,
        "professional_data" => PROFESSIONAL_FILTERS,
        "departments" => DEPARTMENT_FILTERS,
        "company_announcements" => ANNOUNCEMENT_FILTERS,
        _ => &[],
    }
}

fn lookup_ids(table: &[(&str, &'static [&'static str])], endpoint_id: &str) -> Vec<String> {
    table
        .iter()
        .find(|(id, _)| *id == endpoint_id)
        .map(|(_, ids)| ids.iter().map(|s| s.to_string()).collect())
        .unwrap_or_default()
}

/// All HR endpoints in catalog order
pub fn endpoints() -> Vec<EndpointDescriptor> {
    ENDPOINTS
        .iter()
        .map(|(id, name, description)| EndpointDescriptor {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            category: None,
        })
        .collect()
}

/// Look up one endpoint by id
pub fn endpoint(endpoint_id: &str) -> Option<EndpointDescriptor> {
    endpoints().into_iter().find(|e| e.id == endpoint_id)
}

pub fn is_known_endpoint(endpoint_id: &str) -> bool {
    ENDPOINTS.iter().any(|(id, _, _)| *id == endpoint_id)
}

/// Field schema of an endpoint
pub fn fields(endpoint_id: &str) -> Vec<FieldDescriptor> {
    let required = required_fields(endpoint_id);
    field_rows(endpoint_id)
        .iter()
        .map(|(id, name, field_type, category, description)| {
            FieldDescriptor::new(*id, *name, *field_type)
                .with_category(*category)
                .with_description(*description)
                .required(required.iter().any(|r| r == id))
        })
        .collect()
}

/// Look up one field of an endpoint
pub fn field(endpoint_id: &str, field_id: &str) -> Option<FieldDescriptor> {
    fields(endpoint_id).into_iter().find(|f| f.id == field_id)
}

/// Query filters of an endpoint, with option lists merged from the hint table
pub fn filters(endpoint_id: &str) -> Vec<FilterDescriptor> {
    filter_rows(endpoint_id)
        .iter()
        .map(|(id, name, filter_type, description)| {
            let options = filter_hint(endpoint_id, id)
                .map(|h| h.options)
                .filter(|o| !o.is_empty());
            FilterDescriptor {
                id: id.to_string(),
                name: name.to_string(),
                filter_type: if options.is_some() { FilterType::Select } else { *filter_type },
                description: Some(description.to_string()),
                options,
            }
        })
        .collect()
}

/// Fields a create request must carry
pub fn required_fields(endpoint_id: &str) -> Vec<String> {
    lookup_ids(REQUIRED_FIELDS, endpoint_id)
}

/// Fields a create request may carry
pub fn optional_fields(endpoint_id: &str) -> Vec<String> {
    lookup_ids(OPTIONAL_FIELDS, endpoint_id)
}

/// Distinct field categories in first-seen order
pub fn categories(endpoint_id: &str) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for (_, _, _, category, _) in field_rows(endpoint_id) {
        if !seen.iter().any(|c| c == category) {
            seen.push(category.to_string());
        }
    }
    seen
}

/// Demo value used to pre-fill a required field of a create request
pub fn sample_value(field_id: &str) -> &'static str {
    SAMPLE_VALUES
        .iter()
        .find(|(id, _)| *id == field_id)
        .map(|(_, v)| *v)
        .unwrap_or("")
}

/// Example and allowed options for a filter input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterHint {
    pub example: String,
    pub options: Vec<String>,
}

pub fn filter_hint(endpoint_id: &str, filter_id: &str) -> Option<FilterHint> {
    FILTER_HINTS
        .iter()
        .find(|(e, f, _, _)| *e == endpoint_id && *f == filter_id)
        .map(|(_, _, example, options)| FilterHint {
            example: example.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
        })
}

/// Title-case an underscore identifier ("company_announcements" -> "Company Announcements")
pub fn display_name(id: &str) -> String {
    id.split('_')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
