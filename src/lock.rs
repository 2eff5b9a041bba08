/*!
    cooperative locking of the shared register window

    the window and its addressed-channel state are shared with other masters,
    possibly in other processes, so an in-process mutex is not enough: the
    lock is an externally coordinated service, abstracted as [LockSession].
    Acquisition is scoped through [SessionGuard] so release happens on every
    exit path, never through manually paired calls.
*/


/// handle on an externally coordinated lock serializing window access
pub trait LockSession {
    /// blocking acquire
    fn start(&self);
    /// release, must be harmless when no acquire completed
    fn stop(&self);
}
impl<L: LockSession + ?Sized> LockSession for &L {
    fn start(&self) {(**self).start()}
    fn stop(&self) {(**self).stop()}
}

/// lock session for masters that never request exclusive sequences
pub struct NoLock;
impl LockSession for NoLock {
    fn start(&self) {}
    fn stop(&self) {}
}


/// holds the session lock for the scope of its existence
pub struct SessionGuard<'s, L: LockSession + ?Sized> {
    session: &'s L,
}
impl<'s, L: LockSession + ?Sized> SessionGuard<'s, L> {
    /// block until the lock is held
    pub fn acquire(session: &'s L) -> Self {
        session.start();
        Self {session}
    }
}
impl<L: LockSession + ?Sized> Drop for SessionGuard<'_, L> {
    fn drop(&mut self) {
        self.session.stop();
    }
}
