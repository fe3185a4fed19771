//! Canned response bodies of the simulated HR API

use serde_json::{json, Map, Value as JsonValue};

use crate::schema::{FieldDescriptor, FieldType, HttpMethod, Pagination};

/// Body returned when a simulated request fails
pub fn failure_body() -> JsonValue {
    json!({
        "error": "Bad Request",
        "message": "Invalid parameters or configuration",
        "details": ["Some required parameters are missing or invalid"]
    })
}

/// Body returned when a simulated request succeeds
pub fn success_body(
    endpoint: &str,
    method: HttpMethod,
    pagination: Pagination,
    request_body: Option<&JsonValue>,
) -> JsonValue {
    match method {
        HttpMethod::Get => list_body(endpoint, pagination),
        HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch => {
            created_body(endpoint, request_body)
        }
        HttpMethod::Delete => json!({
            "success": true,
            "message": "Request processed successfully"
        }),
    }
}

fn list_body(endpoint: &str, pagination: Pagination) -> JsonValue {
    let (data, total) = match endpoint {
        "employees" => (
            json!([
                {
                    "id": "12345",
                    "first_name": "John",
                    "last_name": "Doe",
                    "email": "john.doe@example.com",
                    "hire_date": "2022-01-15",
                    "department": "Engineering",
                    "position": "Software Developer",
                    "status": "active"
                },
                {
                    "id": "12346",
                    "first_name": "Jane",
                    "last_name": "Smith",
                    "email": "jane.smith@example.com",
                    "hire_date": "2021-06-10",
                    "department": "Marketing",
                    "position": "Content Manager",
                    "status": "active"
                }
            ]),
            254,
        ),
        "attendance" => (
            json!([
                {
                    "id": "98765",
                    "employee_id": "12345",
                    "date": "2023-06-12",
                    "check_in": "09:00:00",
                    "check_out": "17:30:00",
                    "status": "present"
                },
                {
                    "id": "98766",
                    "employee_id": "12346",
                    "date": "2023-06-12",
                    "check_in": "08:50:00",
                    "check_out": "17:15:00",
                    "status": "present"
                }
            ]),
            128,
        ),
        _ => (
            json!([
                { "id": "123", "name": "Sample Data 1" },
                { "id": "124", "name": "Sample Data 2" }
            ]),
            120,
        ),
    };

    json!({
        "data": data,
        "meta": {
            "total": total,
            "page": pagination.page,
            "per_page": pagination.per_page,
            "total_pages": total_pages(total, pagination.per_page)
        }
    })
}

pub fn total_pages(total: u64, per_page: u32) -> u64 {
    let per_page = u64::from(per_page.max(1));
    total.div_ceil(per_page)
}

fn created_body(endpoint: &str, request_body: Option<&JsonValue>) -> JsonValue {
    let (id, message) = match endpoint {
        "employees" => ("12347", "Employee created successfully"),
        "attendance" => ("98767", "Attendance record created successfully"),
        _ => ("new_record_123", "Record created successfully"),
    };

    let mut data = Map::new();
    data.insert("id".to_string(), JsonValue::String(id.to_string()));
    if let Some(JsonValue::Object(fields)) = request_body {
        for (key, value) in fields {
            data.insert(key.clone(), value.clone());
        }
    }

    json!({
        "success": true,
        "message": message,
        "id": id,
        "data": data
    })
}

/// Fields reported by a successful connection test with discovery enabled
pub fn discovered_fields() -> Vec<FieldDescriptor> {
    [
        ("ext_id", "ID", FieldType::String),
        ("ext_name", "Name", FieldType::String),
        ("ext_email", "Email Address", FieldType::String),
        ("ext_created_at", "Created Date", FieldType::Date),
        ("ext_status", "Status", FieldType::String),
        ("ext_department", "Department", FieldType::String),
        ("ext_salary", "Salary", FieldType::Number),
    ]
    .into_iter()
    .map(|(id, name, field_type)| FieldDescriptor::new(id, name, field_type))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(total_pages(254, 10), 26);
        assert_eq!(total_pages(128, 10), 13);
        assert_eq!(total_pages(120, 10), 12);
        assert_eq!(total_pages(254, 25), 11);
        assert_eq!(total_pages(5, 0), 5);
    }

    #[test]
    fn test_list_meta_follows_pagination() {
        let body = success_body("employees", HttpMethod::Get, Pagination::new(3, 50), None);
        assert_eq!(body["meta"]["total"], 254);
        assert_eq!(body["meta"]["page"], 3);
        assert_eq!(body["meta"]["total_pages"], 6);
        assert_eq!(body["data"][1]["first_name"], "Jane");

        let other = success_body("payroll", HttpMethod::Get, Pagination::default(), None);
        assert_eq!(other["meta"]["total"], 120);
    }

    #[test]
    fn test_created_body_merges_values() {
        let request = json!({"first_name": "John", "email": "john.doe@example.com"});
        let body = success_body("employees", HttpMethod::Post, Pagination::default(), Some(&request));
        assert_eq!(body["message"], "Employee created successfully");
        assert_eq!(body["data"]["id"], "12347");
        assert_eq!(body["data"]["first_name"], "John");

        let leave = success_body("leaves", HttpMethod::Patch, Pagination::default(), None);
        assert_eq!(leave["id"], "new_record_123");
    }

    #[test]
    fn test_delete_and_failure() {
        let body = success_body("employees", HttpMethod::Delete, Pagination::default(), None);
        assert_eq!(body["message"], "Request processed successfully");
        assert_eq!(failure_body()["error"], "Bad Request");
    }

    #[test]
    fn test_discovered_fields() {
        let fields = discovered_fields();
        assert_eq!(fields.len(), 7);
        assert_eq!(fields[3].field_type, FieldType::Date);
        assert_eq!(fields[6].id, "ext_salary");
    }
}
