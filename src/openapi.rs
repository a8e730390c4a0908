use utoipa::OpenApi;

use crate::handlers::{conferences, events, research, staff};
use crate::models::{
    Conference, ConferenceForm, ConferenceStatus, CreateEvent, CreateResearchItem,
    CreateStaffMember, DeclaredType, Event, ImageUploadForm, PublicationView, ResearchItem,
    ResearchKind, StaffMember, UpdateEvent, UpdateResearchItem, UpdateStaffMember,
    UploadResponse,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Space Weather Institute API",
        description = "Conferences, research, staff and events of the institute website"
    ),
    paths(
        conferences::list_conferences,
        conferences::list_upcoming_conferences,
        conferences::list_past_conferences,
        conferences::get_conference,
        conferences::create_conference,
        conferences::update_conference,
        conferences::delete_conference,
        conferences::hard_delete_conference,
        research::list_research,
        research::list_projects,
        research::list_publications,
        research::list_recent_publications,
        research::get_research_item,
        research::create_research_item,
        research::update_research_item,
        research::delete_research_item,
        staff::list_staff,
        staff::get_staff_member,
        staff::create_staff_member,
        staff::update_staff_member,
        staff::delete_staff_member,
        staff::upload_staff_image,
        events::list_events,
        events::get_event,
        events::create_event,
        events::update_event,
        events::delete_event,
    ),
    components(schemas(
        Conference, ConferenceForm, ConferenceStatus, DeclaredType,
        ResearchItem, ResearchKind, PublicationView, CreateResearchItem, UpdateResearchItem,
        StaffMember, CreateStaffMember, UpdateStaffMember, UploadResponse, ImageUploadForm,
        Event, CreateEvent, UpdateEvent,
    )),
    tags(
        (name = "conferences", description = "Conference listings and admin management"),
        (name = "research", description = "Research projects and publications"),
        (name = "staff", description = "Staff profiles"),
        (name = "events", description = "News and events")
    )
)]
pub struct ApiDoc;
