use reroute_core::model::ScenarioContext;
use reroute_core::redirect::context::Subject;

use crate::entity::StubEntity;
use crate::request::StubRequest;

/// Build the three evaluation doubles described by a scenario's
/// `context` block.
pub fn scenario_doubles(context: &ScenarioContext) -> (StubRequest, StubEntity, Subject) {
    let request = StubRequest::from_maps(
        context.request.params.clone().into_iter().collect(),
        context.request.data.clone().into_iter().collect(),
        context.request.query.clone().into_iter().collect(),
    );

    let entity = StubEntity::from_fields(context.entity.clone().into_iter().collect());

    let mut subject = Subject::new();
    for (key, value) in &context.subject {
        subject.set(key.clone(), value.clone());
    }

    (request, entity, subject)
}
