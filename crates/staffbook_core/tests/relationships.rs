use staffbook_core::{open_db_in_memory, Department, Employee, Record, Review, Session};

#[test]
fn department_and_employee_resolve_each_other() {
    let conn = open_db_in_memory().unwrap();
    let mut session = Session::new(&conn);

    let department = Department::create(&mut session, "Engineering", "Austin").unwrap();
    let employee =
        Employee::create(&mut session, "Ada", "Engineer", department.id()).unwrap();
    Employee::create(&mut session, "Bob", "Recruiter", None).unwrap();

    let resolved = employee.department(&mut session).unwrap().unwrap();
    assert_eq!(resolved, department);
    assert_eq!(resolved.id(), department.id());

    let staff = department.employees(&mut session).unwrap();
    assert_eq!(staff, vec![employee]);
}

#[test]
fn employee_and_review_resolve_each_other() {
    let conn = open_db_in_memory().unwrap();
    let mut session = Session::new(&conn);

    let employee = Employee::create(&mut session, "Ada", "Engineer", None).unwrap();
    let first = Review::create(&mut session, "Strong start", 4.0, employee.id()).unwrap();
    let second = Review::create(&mut session, "Great year", 5.0, employee.id()).unwrap();
    Review::create(&mut session, "Unassigned", 2.0, None).unwrap();

    let reviews = employee.reviews(&mut session).unwrap();
    assert_eq!(reviews, vec![first.clone(), second]);

    let author = first.employee(&mut session).unwrap().unwrap();
    assert_eq!(author, employee);
}

#[test]
fn dangling_or_missing_foreign_keys_resolve_to_none() {
    let conn = open_db_in_memory().unwrap();
    let mut session = Session::new(&conn);

    let dangling = Employee::create(&mut session, "Eve", "Auditor", Some(999)).unwrap();
    assert!(dangling.department(&mut session).unwrap().is_none());

    let unassigned = Employee::create(&mut session, "Mallory", "Intern", None).unwrap();
    assert!(unassigned.department(&mut session).unwrap().is_none());

    let orphan_review = Review::create(&mut session, "Lost", 3.5, Some(999)).unwrap();
    assert!(orphan_review.employee(&mut session).unwrap().is_none());
}

#[test]
fn deleting_a_department_leaves_employees_dangling() {
    let conn = open_db_in_memory().unwrap();
    let mut session = Session::new(&conn);

    let department = Department::create(&mut session, "Temp", "Nowhere").unwrap();
    let employee = Employee::create(&mut session, "Sam", "Temp", department.id()).unwrap();
    let department_id = department.id();

    department.delete(&mut session).unwrap();

    assert_eq!(employee.fields().department_id(), department_id);
    assert!(employee.department(&mut session).unwrap().is_none());
}

#[test]
fn transient_records_have_no_related_rows() {
    let conn = open_db_in_memory().unwrap();
    let mut session = Session::new(&conn);
    Employee::create(&mut session, "Ada", "Engineer", None).unwrap();

    let department = Record::new(Department::new("Draft", "Draft").unwrap());
    assert!(department.employees(&mut session).unwrap().is_empty());

    let employee = Record::new(Employee::new("Draft", "Draft", None).unwrap());
    assert!(employee.reviews(&mut session).unwrap().is_empty());
}

#[test]
fn reassigning_department_is_visible_after_update() {
    let conn = open_db_in_memory().unwrap();
    let mut session = Session::new(&conn);

    let old = Department::create(&mut session, "Old", "A").unwrap();
    let new = Department::create(&mut session, "New", "B").unwrap();
    let employee = Employee::create(&mut session, "Kim", "Designer", old.id()).unwrap();

    employee.fields_mut().set_department_id(new.id());
    employee.update(&mut session).unwrap();

    assert!(old.employees(&mut session).unwrap().is_empty());
    assert_eq!(new.employees(&mut session).unwrap(), vec![employee.clone()]);
    assert_eq!(employee.department(&mut session).unwrap(), Some(new));
}
