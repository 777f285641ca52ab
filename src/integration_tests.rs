#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use serde_json::json;
    use tokio::sync::mpsc;

    use crate::clients::ResourceClient;
    use crate::config::ClientConfig;
    use crate::form::{DeleteOutcome, DetailController, EntityRef, FieldError, LoadOutcome, SaveOutcome};
    use crate::mock_framework::{create_mock_transport, expect_request, page_body, TransportCall};
    use crate::resources::{CustomerField, Products};
    use crate::system::AdminSystem;

    /// Starts the system and answers the first GET of every list with an empty page.
    async fn start_system() -> (AdminSystem, mpsc::Receiver<TransportCall>) {
        let (transport, mut calls) = create_mock_transport(16);
        let system = AdminSystem::start(transport, &ClientConfig::default());

        let mut paths = BTreeSet::new();
        for _ in 0..4 {
            let call = expect_request(&mut calls).await.expect("Expected initial GET");
            paths.insert(call.request.path.clone());
            call.reply_ok(page_body(json!([]), 0, 0));
        }
        assert_eq!(paths.len(), 4);

        (system, calls)
    }

    #[tokio::test(start_paused = true)]
    async fn test_customer_list_filter_flow() {
        let (system, mut calls) = start_system().await;
        let mut state = system.customer_list.subscribe();

        system
            .customer_list
            .set_filter(CustomerField::Name, "A".to_string())
            .await
            .unwrap();
        system
            .customer_list
            .set_filter(CustomerField::Name, "Ana".to_string())
            .await
            .unwrap();

        // One request once the debounce expires, carrying only the last value.
        let call = expect_request(&mut calls).await.expect("Expected filtered GET");
        assert_eq!(call.request.to_string(), "GET /api/customers?page=0&size=50&name=Ana");
        call.reply_ok(page_body(
            json!([{"id": "c1", "name": "Ana", "phones": ["11999990000", "11888880000"]}]),
            1,
            1,
        ));

        let current = state.wait_for(|s| !s.rows.is_empty()).await.unwrap().clone();
        assert_eq!(current.total_items, 1);
        assert_eq!(current.rows[0].phones, "11999990000, 11888880000");
        assert!(current.notice.is_none());

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_product_edit_flow() {
        let (system, mut calls) = start_system().await;
        let mut form = system.product_detail();

        let responder = tokio::spawn(async move {
            let call = expect_request(&mut calls).await.expect("Expected product GET");
            assert_eq!(call.request.to_string(), "GET /api/products/p1");
            call.reply_ok(json!({"id": "p1", "name": "Cake", "price": 120.0}));

            let call = expect_request(&mut calls).await.expect("Expected product PUT");
            assert_eq!(call.request.to_string(), "PUT /api/products/p1");
            assert_eq!(call.request.body, Some(json!({"name": "Big cake", "price": 150.0})));
            call.reply_ok(json!({"id": "p1", "name": "Big cake", "price": 150.0}));
            calls
        });

        assert_eq!(form.load(EntityRef::parse(Some("p1"))).await, LoadOutcome::Loaded);
        assert_eq!(form.draft().name, "Cake");

        form.draft_mut().name = "Big cake".to_string();
        form.draft_mut().price = Some(150.0);
        match form.save().await {
            SaveOutcome::Updated { id, .. } => assert_eq!(id, "p1"),
            other => panic!("Unexpected outcome: {:?}", other),
        }

        let _calls = responder.await.unwrap();
        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_new_customer_posts_without_loading() {
        let (system, mut calls) = start_system().await;
        let mut form = system.customer_detail();

        assert_eq!(form.load(EntityRef::parse(Some("new"))).await, LoadOutcome::Blank);
        form.draft_mut().name = "Bia".to_string();
        form.draft_mut().add_phone("11999990000");

        let responder = tokio::spawn(async move {
            let call = expect_request(&mut calls).await.expect("Expected customer POST");
            assert_eq!(call.request.to_string(), "POST /api/customers");
            call.reply_ok(json!({"id": "c7", "name": "Bia", "phones": ["11999990000"]}));
            calls
        });

        match form.save().await {
            SaveOutcome::Created { id, .. } => assert_eq!(id, "c7"),
            other => panic!("Unexpected outcome: {:?}", other),
        }
        assert_eq!(form.entity(), &EntityRef::Existing("c7".to_string()));

        let _calls = responder.await.unwrap();
        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_closes_dialog_and_reloads_list() {
        let (system, mut calls) = start_system().await;
        let before = system.customer_list.state().requested;
        let mut dialog = system.delete_customer("c1");
        assert!(dialog.is_open());

        let confirm = tokio::spawn(async move {
            let outcome = dialog.confirm().await;
            (outcome, dialog)
        });

        let call = expect_request(&mut calls).await.expect("Expected DELETE");
        assert_eq!(call.request.to_string(), "DELETE /api/customers/c1");
        call.reply_no_content();

        let call = expect_request(&mut calls).await.expect("Expected list reload");
        assert_eq!(call.request.to_string(), "GET /api/customers?page=0&size=50");
        call.reply_ok(page_body(json!([]), 0, 0));

        let (outcome, dialog) = confirm.await.unwrap();
        assert_eq!(outcome, DeleteOutcome::Deleted);
        assert!(!dialog.is_open());
        assert!(system.customer_list.state().requested > before);

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_blank_product_name_never_reaches_the_network() {
        let (transport, mut calls) = create_mock_transport(4);
        let mut form = DetailController::<Products>::new(ResourceClient::new(transport));

        form.draft_mut().price = Some(10.0);
        match form.save().await {
            SaveOutcome::Invalid(errors) => assert!(errors.has("name", &FieldError::Required)),
            other => panic!("Unexpected outcome: {:?}", other),
        }
        assert!(form.errors().has("name", &FieldError::Required));
        assert!(calls.try_recv().is_err());
    }
}
