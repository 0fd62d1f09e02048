use crate::{Employee, EmployeeFields, EmployeeId, LoginRequest, LoginResponse};
use serde::{Serialize, de::DeserializeOwned};
use std::fmt;

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest {
    /// The JSON body sent with the request. `()` for body-less requests.
    type Body: Serialize;
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// Whether the request carries the bearer token.
    const REQUIRES_AUTH: bool = true;

    /// The URL path, relative to the API base URL.
    fn path(&self) -> String;

    fn body(&self) -> Option<&Self::Body> {
        None
    }
}

pub const EMPLOYEE_PATH: &str = "/Employee";
pub const LOGIN_PATH: &str = "/auth/login";

fn employee_path(id: EmployeeId) -> String {
    format!("{}/{}", EMPLOYEE_PATH, id)
}

// =========================================================
// Request Definitions
// =========================================================

impl ApiRequest for LoginRequest {
    type Body = LoginRequest;
    type Response = LoginResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    const REQUIRES_AUTH: bool = false;

    fn path(&self) -> String {
        LOGIN_PATH.to_string()
    }

    fn body(&self) -> Option<&Self::Body> {
        Some(self)
    }
}

/// List all employees
#[derive(Debug, Clone, Copy)]
pub struct ListEmployeesRequest;

impl ApiRequest for ListEmployeesRequest {
    type Body = ();
    type Response = Vec<Employee>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        EMPLOYEE_PATH.to_string()
    }
}

/// Create an employee; the server assigns the id
#[derive(Debug, Clone)]
pub struct CreateEmployeeRequest {
    pub fields: EmployeeFields,
}

impl ApiRequest for CreateEmployeeRequest {
    type Body = EmployeeFields;
    type Response = Employee;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        EMPLOYEE_PATH.to_string()
    }

    fn body(&self) -> Option<&Self::Body> {
        Some(&self.fields)
    }
}

/// Replace name, email and department of an existing employee
#[derive(Debug, Clone)]
pub struct UpdateEmployeeRequest {
    pub id: EmployeeId,
    pub fields: EmployeeFields,
}

impl ApiRequest for UpdateEmployeeRequest {
    type Body = EmployeeFields;
    type Response = Employee;
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        employee_path(self.id)
    }

    fn body(&self) -> Option<&Self::Body> {
        Some(&self.fields)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DeleteEmployeeRequest {
    pub id: EmployeeId,
}

impl ApiRequest for DeleteEmployeeRequest {
    type Body = ();
    type Response = (); // empty body on success
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        employee_path(self.id)
    }
}
