/*!
    capabilities and descriptors for addressing the shared register window

    the window itself is an external resource (typically a memory-mapped BAR
    owned by whoever enumerated the hardware); this crate only depends on the
    minimal [RegisterWindow] contract so it can run against an in-memory fake.
*/

use core::fmt;


/// raw access to a fixed register window, addressed by 32bit word index
pub trait RegisterWindow {
    fn write_register(&self, index: u32, value: u32);
    fn read_register(&self, index: u32) -> u32;
}
impl<W: RegisterWindow + ?Sized> RegisterWindow for &W {
    fn write_register(&self, index: u32, value: u32) {
        (**self).write_register(index, value)
    }
    fn read_register(&self, index: u32) -> u32 {
        (**self).read_register(index)
    }
}


/// number of logical links carried by one endpoint
pub const LINKS_PER_ENDPOINT: u16 = 12;
/// maximum logical link id addressable on one device
pub const MAX_LINKS_PER_DEVICE: u16 = 24;


/// serial identifier of the device behind the window
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct SerialId {
    /// serial number of the physical card
    pub serial: u32,
    /// endpoint of the card the window maps to
    pub endpoint: u16,
}
impl fmt::Display for SerialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.serial, self.endpoint)
    }
}


/**
    descriptor of one logical communication endpoint on the shared window

    the raw link id actually written to the select register is derived from
    the logical id, `endpoint * LINKS_PER_ENDPOINT + link_id`; it is
    recomputed on every change of the logical id and never set independently.
*/
#[derive(Clone, Debug)]
pub struct Link {
    /// name of the session owning this link
    pub session: String,
    /// device the link belongs to
    pub serial: SerialId,
    link_id: Option<u16>,
    raw_id: u16,
}
impl Link {
    /// descriptor for the given logical link, `None` meaning not yet selected
    pub fn new(session: impl Into<String>, serial: SerialId, link_id: Option<u16>) -> Self {
        let mut new = Self {
            session: session.into(),
            serial,
            link_id: None,
            raw_id: 0,
            };
        if let Some(id) = link_id {
            new.select(id);
        }
        new
    }
    /// currently selected logical link, if any
    pub fn link_id(&self) -> Option<u16> {self.link_id}
    /// raw id addressing this link on the shared window
    pub fn raw_id(&self) -> u16 {self.raw_id}
    /// switch to the given logical link, recomputing the raw id
    pub(crate) fn select(&mut self, link_id: u16) {
        self.link_id = Some(link_id);
        self.raw_id = self.serial.endpoint * LINKS_PER_ENDPOINT + link_id;
    }
}
