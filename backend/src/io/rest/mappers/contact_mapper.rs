use shared::{Contact, ContactListResponse, ContactRelation, ContactRequest};

use crate::domain::commands::contacts::ContactCommand;
use crate::domain::models::contact::{DomainContact, DomainContactRelation};

pub struct ContactMapper;

impl ContactMapper {
    pub fn to_command(dto: ContactRequest) -> ContactCommand {
        ContactCommand {
            name: dto.name,
            phone: dto.phone,
            relation: match dto.relation {
                ContactRelation::Family => DomainContactRelation::Family,
                ContactRelation::Doctor => DomainContactRelation::Doctor,
                ContactRelation::Other => DomainContactRelation::Other,
            },
        }
    }

    pub fn to_dto(domain: DomainContact) -> Contact {
        Contact {
            id: domain.id,
            name: domain.name,
            phone: domain.phone,
            relation: match domain.relation {
                DomainContactRelation::Family => ContactRelation::Family,
                DomainContactRelation::Doctor => ContactRelation::Doctor,
                DomainContactRelation::Other => ContactRelation::Other,
            },
        }
    }

    pub fn to_list_dto(contacts: Vec<DomainContact>) -> ContactListResponse {
        ContactListResponse {
            contacts: contacts.into_iter().map(Self::to_dto).collect(),
        }
    }
}
