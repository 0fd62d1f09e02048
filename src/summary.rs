//! 部门汇总：由当前员工列表派生，不单独存储

use staffdesk_shared::Employee;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DepartmentCount {
    pub department: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepartmentSummary {
    total: usize,
    /// 按部门首次出现的顺序排列，计数均大于 0
    departments: Vec<DepartmentCount>,
}

impl DepartmentSummary {
    pub fn from_employees(employees: &[Employee]) -> Self {
        let mut departments: Vec<DepartmentCount> = Vec::new();
        for employee in employees {
            let name = employee.department();
            match departments.iter_mut().find(|d| d.department == name) {
                Some(entry) => entry.count += 1,
                None => departments.push(DepartmentCount {
                    department: name.to_string(),
                    count: 1,
                }),
            }
        }

        Self {
            total: employees.len(),
            departments,
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn departments(&self) -> &[DepartmentCount] {
        &self.departments
    }

    pub fn count_for(&self, department: &str) -> usize {
        self.departments
            .iter()
            .find(|d| d.department == department)
            .map_or(0, |d| d.count)
    }
}
