// Demo accounts written by `trainflow init`

use crate::requests::types::{Availability, Specialization, User};
use crate::roles::Role;

fn user(id: &str, code: &str, name: &str, role: Role, region: &str, department: &str) -> User {
    User {
        id: id.to_string(),
        code: code.to_string(),
        name: name.to_string(),
        email: format!("{}@trainflow.local", code.to_lowercase()),
        role,
        region: region.to_string(),
        department: department.to_string(),
        specialization: None,
        rating: None,
        availability: None,
    }
}

fn trainer(
    (id, code, name): (&str, &str, &str),
    region: &str,
    spec: Specialization,
    rating: f32,
    availability: Availability,
) -> User {
    User {
        specialization: Some(spec),
        rating: Some(rating),
        availability: Some(availability),
        ..user(id, code, name, Role::Tr, region, "Training")
    }
}

/// One account per role plus a small trainer pool
pub fn demo_users() -> Vec<User> {
    vec![
        user("u-dv-01", "DV001", "Mona Khalil", Role::Dv, "Cairo", "Operations"),
        user("u-sv-01", "SV001", "Omar Said", Role::Sv, "Cairo", "Operations"),
        user("u-pm-01", "PM001", "Laila Mansour", Role::Pm, "Cairo", "Programs"),
        user("u-cc-01", "CC001", "Karim Nabil", Role::Cc, "Cairo", "Coordination"),
        user("u-mb-01", "MB001", "Hala Youssef", Role::Mb, "Cairo", "Board"),
        trainer(("TR-01", "TR001", "Ahmed Hassan"), "Cairo", Specialization::Leadership, 4.8, Availability::Available),
        trainer(("TR-02", "TR002", "Sara Mohamed"), "Alexandria", Specialization::Communication, 4.9, Availability::Busy),
        trainer(("TR-03", "TR003", "Mohamed Ali"), "Giza", Specialization::ProjectManagement, 4.7, Availability::Available),
        trainer(("TR-04", "TR004", "Layla Mahmoud"), "Giza", Specialization::TechnicalSkills, 4.6, Availability::Unavailable),
        trainer(("TR-05", "TR005", "Omar Khaled"), "Alexandria", Specialization::SoftSkills, 4.5, Availability::Available),
    ]
}
