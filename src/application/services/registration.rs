//! # Registration Service
//!
//! Validated writes to the Event↔Attendee association.
//!
//! A registration request walks the stages of [`RegistrationStage`]:
//! the event is looked up, then the attendee, then the pair itself, and
//! only when all three checks pass is a row inserted and re-read with its
//! joined details. Every check is read-only, so a rejected request leaves
//! the store untouched.
//!
//! The pre-checks give precise rejection reasons, but the store's
//! constraints have the last word: an insert refused by the unique key or a
//! foreign key (because a concurrent request won the race) is classified
//! the same way as the corresponding pre-check failure.

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::entities::{RegistrationDetail, RegistrationRejection};
use crate::domain::value_objects::{AttendeeId, EventId, RegistrationKey, RegistrationStage};
use crate::infrastructure::persistence::Repositories;
use crate::infrastructure::persistence::traits::{
    AttendeeRepository, EventRepository, RegistrationRepository, RepositoryError,
};
use std::sync::Arc;
use tracing::{debug, info};

/// Tracks the stage of one registration request and logs each step.
#[derive(Debug)]
struct Progress {
    key: RegistrationKey,
    stage: RegistrationStage,
}

impl Progress {
    fn start(key: RegistrationKey) -> Self {
        let stage = RegistrationStage::default();
        debug!(
            event_id = %key.event_id,
            attendee_id = %key.attendee_id,
            %stage,
            "Registration stage"
        );
        Self { key, stage }
    }

    fn advance(&mut self) {
        if let Some(next) = self.stage.next() {
            self.stage = next;
            debug!(
                event_id = %self.key.event_id,
                attendee_id = %self.key.attendee_id,
                stage = %self.stage,
                "Registration stage"
            );
        }
    }

    fn reject(&self, rejection: RegistrationRejection) -> ApplicationError {
        info!(
            event_id = %self.key.event_id,
            attendee_id = %self.key.attendee_id,
            stage = %self.stage,
            code = rejection.code(),
            "Registration rejected"
        );
        ApplicationError::rejected(rejection)
    }

    /// Maps a write refused by a store constraint to its rejection.
    fn classify(&self, err: RepositoryError) -> ApplicationError {
        let rejection = match &err {
            RepositoryError::Duplicate { .. } => {
                Some(RegistrationRejection::DuplicateRegistration)
            }
            RepositoryError::MissingReference {
                entity_type: "Event",
                ..
            } => Some(RegistrationRejection::InvalidEvent),
            RepositoryError::MissingReference {
                entity_type: "Attendee",
                ..
            } => Some(RegistrationRejection::InvalidAttendee),
            _ => None,
        };
        match rejection {
            Some(rejection) => self.reject(rejection),
            None => err.into(),
        }
    }
}

/// Service for registering attendees to events.
///
/// # Examples
///
/// ```
/// use event_manager::application::services::RegistrationService;
/// use event_manager::domain::value_objects::{AttendeeId, EventId, RegistrationKey};
/// use event_manager::infrastructure::persistence::in_memory::InMemoryStore;
///
/// # tokio_test::block_on(async {
/// let store = InMemoryStore::new();
/// let service = RegistrationService::from_repositories(&store.repositories());
///
/// let key = RegistrationKey::new(EventId::new(1), AttendeeId::new(7));
/// let err = service.register(key).await.unwrap_err();
/// assert_eq!(err.rejection().map(|r| r.code()), Some("INVALID_EVENT"));
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct RegistrationService {
    events: Arc<dyn EventRepository>,
    attendees: Arc<dyn AttendeeRepository>,
    registrations: Arc<dyn RegistrationRepository>,
}

impl RegistrationService {
    /// Creates a new RegistrationService.
    #[must_use]
    pub fn new(
        events: Arc<dyn EventRepository>,
        attendees: Arc<dyn AttendeeRepository>,
        registrations: Arc<dyn RegistrationRepository>,
    ) -> Self {
        Self {
            events,
            attendees,
            registrations,
        }
    }

    /// Creates a service over the repositories of one store.
    #[must_use]
    pub fn from_repositories(repositories: &Repositories) -> Self {
        Self::new(
            Arc::clone(&repositories.events),
            Arc::clone(&repositories.attendees),
            Arc::clone(&repositories.registrations),
        )
    }

    /// Registers an attendee for an event.
    ///
    /// Returns the new registration joined with its event and attendee.
    ///
    /// # Errors
    ///
    /// - [`ApplicationError::Rejected`] with `InvalidEvent`,
    ///   `InvalidAttendee` or `DuplicateRegistration`, checked in that order
    /// - [`ApplicationError::Infrastructure`] if the store fails, or if the
    ///   inserted row is gone before it can be re-read
    pub async fn register(&self, key: RegistrationKey) -> ApplicationResult<RegistrationDetail> {
        let mut progress = Progress::start(key);
        self.check(&mut progress).await?;

        progress.advance();
        self.registrations
            .insert(key)
            .await
            .map_err(|e| progress.classify(e))?;

        progress.advance();
        let detail = self.confirm(key).await?;
        info!(
            event_id = %key.event_id,
            attendee_id = %key.attendee_id,
            "Attendee registered"
        );
        Ok(detail)
    }

    /// Removes a registration.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::NotFound`] if the pair was not registered.
    pub async fn unregister(&self, key: RegistrationKey) -> ApplicationResult<()> {
        if !self.registrations.delete(key).await? {
            return Err(ApplicationError::not_found("Registration", key));
        }
        info!(
            event_id = %key.event_id,
            attendee_id = %key.attendee_id,
            "Attendee unregistered"
        );
        Ok(())
    }

    /// Moves a registration from one pair to another in one transaction.
    ///
    /// Reassigning a pair to itself succeeds without writing. Otherwise the
    /// new pair is checked exactly like [`register`](Self::register) and
    /// the old pair stays in place if it is rejected.
    ///
    /// # Errors
    ///
    /// - [`ApplicationError::NotFound`] if `from` is not registered
    /// - [`ApplicationError::Rejected`] for the `to` pair, as for `register`
    /// - [`ApplicationError::Infrastructure`] if the store fails
    pub async fn reassign(
        &self,
        from: RegistrationKey,
        to: RegistrationKey,
    ) -> ApplicationResult<RegistrationDetail> {
        if !self.registrations.exists(from).await? {
            return Err(ApplicationError::not_found("Registration", from));
        }
        if from == to {
            return self.confirm(to).await;
        }

        let mut progress = Progress::start(to);
        self.check(&mut progress).await?;

        progress.advance();
        let replaced = self
            .registrations
            .replace(from, to)
            .await
            .map_err(|e| progress.classify(e))?;
        if !replaced {
            return Err(ApplicationError::not_found("Registration", from));
        }

        progress.advance();
        let detail = self.confirm(to).await?;
        info!(%from, %to, "Registration reassigned");
        Ok(detail)
    }

    /// Lists every registration, ordered by attendee name then event.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Infrastructure`] if the store fails.
    pub async fn list(&self) -> ApplicationResult<Vec<RegistrationDetail>> {
        Ok(self.registrations.list().await?)
    }

    /// Lists the attendees registered for one event.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::NotFound`] if the event does not exist.
    pub async fn list_for_event(
        &self,
        event_id: EventId,
    ) -> ApplicationResult<Vec<RegistrationDetail>> {
        if !self.events.exists(event_id).await? {
            return Err(ApplicationError::not_found("Event", event_id));
        }
        Ok(self.registrations.find_by_event(event_id).await?)
    }

    /// Lists the events one attendee is registered for.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::NotFound`] if the attendee does not exist.
    pub async fn list_for_attendee(
        &self,
        attendee_id: AttendeeId,
    ) -> ApplicationResult<Vec<RegistrationDetail>> {
        if !self.attendees.exists(attendee_id).await? {
            return Err(ApplicationError::not_found("Attendee", attendee_id));
        }
        Ok(self.registrations.find_by_attendee(attendee_id).await?)
    }

    /// Lists the registration of one pair: empty or a single row.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::NotFound`] if the event or the attendee
    /// does not exist, checked in that order.
    pub async fn list_for_pair(
        &self,
        key: RegistrationKey,
    ) -> ApplicationResult<Vec<RegistrationDetail>> {
        if !self.events.exists(key.event_id).await? {
            return Err(ApplicationError::not_found("Event", key.event_id));
        }
        if !self.attendees.exists(key.attendee_id).await? {
            return Err(ApplicationError::not_found("Attendee", key.attendee_id));
        }
        Ok(self.registrations.get(key).await?.into_iter().collect())
    }

    /// Runs the three read-only checks, leaving `progress` at
    /// [`RegistrationStage::CheckingDuplicate`].
    async fn check(&self, progress: &mut Progress) -> ApplicationResult<()> {
        let key = progress.key;

        if !self.events.exists(key.event_id).await? {
            return Err(progress.reject(RegistrationRejection::InvalidEvent));
        }

        progress.advance();
        if !self.attendees.exists(key.attendee_id).await? {
            return Err(progress.reject(RegistrationRejection::InvalidAttendee));
        }

        progress.advance();
        if self.registrations.exists(key).await? {
            return Err(progress.reject(RegistrationRejection::DuplicateRegistration));
        }

        Ok(())
    }

    async fn confirm(&self, key: RegistrationKey) -> ApplicationResult<RegistrationDetail> {
        self.registrations.get(key).await?.ok_or_else(|| {
            RepositoryError::internal(format!("registration {key} missing after write")).into()
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::entities::{Attendee, Event};
    use crate::infrastructure::persistence::in_memory::{InMemoryStore, fixtures};
    use crate::infrastructure::persistence::traits::RepositoryResult;
    use async_trait::async_trait;

    struct Seeded {
        store: InMemoryStore,
        service: RegistrationService,
        event: Event,
        other_event: Event,
        attendee: Attendee,
    }

    async fn seeded() -> Seeded {
        let store = InMemoryStore::new();
        let venue = fixtures::venue(&store, "Hall").await;
        let event = fixtures::event(&store, venue.id, "Launch Party").await;
        let other_event = fixtures::event(&store, venue.id, "Workshop").await;
        let attendee = fixtures::attendee(&store, "A.", "Lee").await;
        let service = RegistrationService::from_repositories(&store.repositories());
        Seeded {
            store,
            service,
            event,
            other_event,
            attendee,
        }
    }

    impl Seeded {
        fn key(&self) -> RegistrationKey {
            RegistrationKey::new(self.event.id, self.attendee.id)
        }

        async fn count(&self) -> u64 {
            self.store.registrations().count().await.unwrap()
        }
    }

    fn rejection(result: ApplicationResult<RegistrationDetail>) -> RegistrationRejection {
        result.unwrap_err().rejection().unwrap()
    }

    mod register {
        use super::*;

        #[tokio::test]
        async fn confirms_with_joined_details() {
            let s = seeded().await;
            let detail = s.service.register(s.key()).await.unwrap();

            assert_eq!(detail.key(), s.key());
            assert_eq!(detail.event_name, "Launch Party");
            assert_eq!(detail.attendee_name(), "A. Lee");
            assert_eq!(detail.email, "lee@example.com");
            assert_eq!(s.count().await, 1);
        }

        #[tokio::test]
        async fn missing_event_is_checked_first() {
            let s = seeded().await;
            let key = RegistrationKey::new(EventId::new(99), AttendeeId::new(99));

            assert_eq!(
                rejection(s.service.register(key).await),
                RegistrationRejection::InvalidEvent
            );
            assert_eq!(s.count().await, 0);
        }

        #[tokio::test]
        async fn missing_attendee() {
            let s = seeded().await;
            let key = RegistrationKey::new(s.event.id, AttendeeId::new(99));

            assert_eq!(
                rejection(s.service.register(key).await),
                RegistrationRejection::InvalidAttendee
            );
            assert_eq!(s.count().await, 0);
        }

        #[tokio::test]
        async fn duplicate_keeps_failing_without_writing() {
            let s = seeded().await;
            s.service.register(s.key()).await.unwrap();

            for _ in 0..3 {
                assert_eq!(
                    rejection(s.service.register(s.key()).await),
                    RegistrationRejection::DuplicateRegistration
                );
            }
            assert_eq!(s.count().await, 1);
        }
    }

    mod unregister {
        use super::*;

        #[tokio::test]
        async fn removes_then_reports_not_found() {
            let s = seeded().await;
            s.service.register(s.key()).await.unwrap();

            s.service.unregister(s.key()).await.unwrap();
            assert_eq!(s.count().await, 0);

            let err = s.service.unregister(s.key()).await.unwrap_err();
            assert!(err.is_not_found());
        }

        #[tokio::test]
        async fn never_registered_pair_is_not_found() {
            let s = seeded().await;
            let err = s.service.unregister(s.key()).await.unwrap_err();
            assert!(err.is_not_found());
        }
    }

    mod reassign {
        use super::*;

        #[tokio::test]
        async fn moves_the_registration() {
            let s = seeded().await;
            s.service.register(s.key()).await.unwrap();
            let to = RegistrationKey::new(s.other_event.id, s.attendee.id);

            let detail = s.service.reassign(s.key(), to).await.unwrap();

            assert_eq!(detail.event_name, "Workshop");
            let registrations = s.store.registrations();
            assert!(!registrations.exists(s.key()).await.unwrap());
            assert!(registrations.exists(to).await.unwrap());
            assert_eq!(s.count().await, 1);
        }

        #[tokio::test]
        async fn absent_source_is_not_found() {
            let s = seeded().await;
            let to = RegistrationKey::new(s.other_event.id, s.attendee.id);

            let err = s.service.reassign(s.key(), to).await.unwrap_err();
            assert!(err.is_not_found());
            assert_eq!(s.count().await, 0);
        }

        #[tokio::test]
        async fn into_duplicate_keeps_source() {
            let s = seeded().await;
            let to = RegistrationKey::new(s.other_event.id, s.attendee.id);
            s.service.register(s.key()).await.unwrap();
            s.service.register(to).await.unwrap();

            assert_eq!(
                rejection(s.service.reassign(s.key(), to).await),
                RegistrationRejection::DuplicateRegistration
            );
            assert!(s.store.registrations().exists(s.key()).await.unwrap());
            assert_eq!(s.count().await, 2);
        }

        #[tokio::test]
        async fn into_missing_event_keeps_source() {
            let s = seeded().await;
            s.service.register(s.key()).await.unwrap();
            let to = RegistrationKey::new(EventId::new(99), s.attendee.id);

            assert_eq!(
                rejection(s.service.reassign(s.key(), to).await),
                RegistrationRejection::InvalidEvent
            );
            assert!(s.store.registrations().exists(s.key()).await.unwrap());
        }

        #[tokio::test]
        async fn to_same_pair_is_a_no_op() {
            let s = seeded().await;
            s.service.register(s.key()).await.unwrap();

            let detail = s.service.reassign(s.key(), s.key()).await.unwrap();
            assert_eq!(detail.key(), s.key());
            assert_eq!(s.count().await, 1);
        }
    }

    mod listing {
        use super::*;

        #[tokio::test]
        async fn filters_by_side() {
            let s = seeded().await;
            let bo = fixtures::attendee(&s.store, "Bo", "Kim").await;
            s.service.register(s.key()).await.unwrap();
            s.service
                .register(RegistrationKey::new(s.event.id, bo.id))
                .await
                .unwrap();
            s.service
                .register(RegistrationKey::new(s.other_event.id, bo.id))
                .await
                .unwrap();

            assert_eq!(s.service.list().await.unwrap().len(), 3);
            assert_eq!(s.service.list_for_event(s.event.id).await.unwrap().len(), 2);
            assert_eq!(s.service.list_for_attendee(bo.id).await.unwrap().len(), 2);
        }

        #[tokio::test]
        async fn unknown_side_is_not_found() {
            let s = seeded().await;
            assert!(
                s.service
                    .list_for_event(EventId::new(99))
                    .await
                    .unwrap_err()
                    .is_not_found()
            );
            assert!(
                s.service
                    .list_for_attendee(AttendeeId::new(99))
                    .await
                    .unwrap_err()
                    .is_not_found()
            );
        }

        #[tokio::test]
        async fn pair_checks_both_sides() {
            let s = seeded().await;
            s.service.register(s.key()).await.unwrap();

            assert_eq!(s.service.list_for_pair(s.key()).await.unwrap().len(), 1);
            let unregistered = RegistrationKey::new(s.other_event.id, s.attendee.id);
            assert!(s.service.list_for_pair(unregistered).await.unwrap().is_empty());

            let err = s
                .service
                .list_for_pair(RegistrationKey::new(s.event.id, AttendeeId::new(99)))
                .await
                .unwrap_err();
            assert!(matches!(
                err,
                ApplicationError::NotFound { ref resource_type, .. } if resource_type == "Attendee"
            ));

            let err = s
                .service
                .list_for_pair(RegistrationKey::new(EventId::new(99), AttendeeId::new(99)))
                .await
                .unwrap_err();
            assert!(matches!(
                err,
                ApplicationError::NotFound { ref resource_type, .. } if resource_type == "Event"
            ));
        }
    }

    /// Registration repository whose pre-check never sees existing rows,
    /// as if a concurrent request inserted between check and write.
    #[derive(Debug)]
    struct RacingRegistrations {
        inner: Arc<dyn RegistrationRepository>,
    }

    #[async_trait]
    impl RegistrationRepository for RacingRegistrations {
        async fn list(&self) -> RepositoryResult<Vec<RegistrationDetail>> {
            self.inner.list().await
        }

        async fn find_by_event(
            &self,
            event_id: EventId,
        ) -> RepositoryResult<Vec<RegistrationDetail>> {
            self.inner.find_by_event(event_id).await
        }

        async fn find_by_attendee(
            &self,
            attendee_id: AttendeeId,
        ) -> RepositoryResult<Vec<RegistrationDetail>> {
            self.inner.find_by_attendee(attendee_id).await
        }

        async fn get(&self, key: RegistrationKey) -> RepositoryResult<Option<RegistrationDetail>> {
            self.inner.get(key).await
        }

        async fn exists(&self, _key: RegistrationKey) -> RepositoryResult<bool> {
            Ok(false)
        }

        async fn insert(&self, key: RegistrationKey) -> RepositoryResult<()> {
            self.inner.insert(key).await
        }

        async fn replace(
            &self,
            from: RegistrationKey,
            to: RegistrationKey,
        ) -> RepositoryResult<bool> {
            self.inner.replace(from, to).await
        }

        async fn delete(&self, key: RegistrationKey) -> RepositoryResult<bool> {
            self.inner.delete(key).await
        }

        async fn count(&self) -> RepositoryResult<u64> {
            self.inner.count().await
        }
    }

    #[tokio::test]
    async fn store_constraint_decides_a_lost_race() {
        let s = seeded().await;
        s.service.register(s.key()).await.unwrap();

        let repositories = s.store.repositories();
        let racing = RegistrationService::new(
            repositories.events,
            repositories.attendees,
            Arc::new(RacingRegistrations {
                inner: repositories.registrations,
            }),
        );

        assert_eq!(
            rejection(racing.register(s.key()).await),
            RegistrationRejection::DuplicateRegistration
        );
        assert_eq!(s.count().await, 1);
    }

    #[tokio::test]
    async fn concurrent_duplicates_insert_once() {
        let s = seeded().await;
        let key = s.key();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let service = s.service.clone();
                tokio::spawn(async move { service.register(key).await })
            })
            .collect();

        let mut confirmed = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => confirmed += 1,
                Err(err) => assert_eq!(
                    err.rejection(),
                    Some(RegistrationRejection::DuplicateRegistration)
                ),
            }
        }
        assert_eq!(confirmed, 1);
        assert_eq!(s.count().await, 1);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        /// Seeds `events` events and `attendees` attendees, ids 1..=n.
        async fn store_with(events: i64, attendees: i64) -> (InMemoryStore, RegistrationService) {
            let store = InMemoryStore::new();
            let venue = fixtures::venue(&store, "Hall").await;
            for i in 0..events {
                fixtures::event(&store, venue.id, &format!("Event {i}")).await;
            }
            for i in 0..attendees {
                fixtures::attendee(&store, "Guest", &format!("Number{i}")).await;
            }
            let service = RegistrationService::from_repositories(&store.repositories());
            (store, service)
        }

        proptest! {
            #[test]
            fn outcome_follows_check_order(
                event in 1i64..8,
                attendee in 1i64..8,
                registered_first in any::<bool>(),
            ) {
                tokio_test::block_on(async {
                    let (store, service) = store_with(4, 4).await;
                    let key = RegistrationKey::new(EventId::new(event), AttendeeId::new(attendee));
                    let both_exist = event <= 4 && attendee <= 4;
                    if registered_first && both_exist {
                        service.register(key).await.unwrap();
                    }
                    let before = store.registrations().count().await.unwrap();

                    let result = service.register(key).await;
                    let after = store.registrations().count().await.unwrap();

                    let expected = if event > 4 {
                        Some(RegistrationRejection::InvalidEvent)
                    } else if attendee > 4 {
                        Some(RegistrationRejection::InvalidAttendee)
                    } else if registered_first {
                        Some(RegistrationRejection::DuplicateRegistration)
                    } else {
                        None
                    };

                    match expected {
                        Some(rejection) => {
                            assert_eq!(result.unwrap_err().rejection(), Some(rejection));
                            assert_eq!(after, before);
                        }
                        None => {
                            let detail = result.unwrap();
                            assert_eq!(detail.key(), key);
                            assert_eq!(detail.event_name, format!("Event {}", event - 1));
                            assert_eq!(detail.last_name, format!("Number{}", attendee - 1));
                            assert_eq!(after, before + 1);
                        }
                    }
                });
            }

            #[test]
            fn unregister_of_unregistered_pair_deletes_nothing(
                event in 1i64..6,
                attendee in 1i64..6,
            ) {
                tokio_test::block_on(async {
                    let (store, service) = store_with(3, 3).await;
                    let seeded = RegistrationKey::new(EventId::new(1), AttendeeId::new(1));
                    service.register(seeded).await.unwrap();
                    let key = RegistrationKey::new(EventId::new(event), AttendeeId::new(attendee));

                    let result = service.unregister(key).await;
                    let count = store.registrations().count().await.unwrap();

                    if key == seeded {
                        assert!(result.is_ok());
                        assert_eq!(count, 0);
                    } else {
                        assert!(result.unwrap_err().is_not_found());
                        assert_eq!(count, 1);
                    }
                });
            }
        }
    }
}
